use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Annotate(#[from] typehint_annotator::Error),
}
