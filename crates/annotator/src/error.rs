use thiserror::Error;
use value::Name;

use crate::UnresolvedFragment;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to parse query: {0}")]
    Parse(#[from] parser::Error),

    #[error("Unknown operation named '{0}'.")]
    UnknownOperation(String),

    #[error("Fragments could not be resolved: {}", fragment_names(.0))]
    UnresolvedFragments(Vec<UnresolvedFragment>),

    #[error("Spread of undefined fragments: {}", quoted(.0))]
    UndefinedFragments(Vec<Name>),
}

fn fragment_names(fragments: &[UnresolvedFragment]) -> String {
    quoted(
        &fragments
            .iter()
            .map(|fragment| fragment.name.clone())
            .collect::<Vec<_>>(),
    )
}

fn quoted(names: &[Name]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}
