use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use indexmap::{IndexMap, IndexSet};
use parser::types::FragmentDefinition;
use parser::Positioned;
use typehint_schema::Schema;
use value::Name;

use crate::type_map::TypeMap;
use crate::walker::Walker;

/// Why a fragment spread could not be replaced by its content.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BlockedOn {
    /// No fragment with this name is defined in the document.
    Undefined(Name),
    /// The fragment is defined but never resolved, usually because of a cycle.
    Unresolved(Name),
}

impl Display for BlockedOn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BlockedOn::Undefined(name) => write!(f, "undefined fragment '{}'", name),
            BlockedOn::Unresolved(name) => write!(f, "unresolved fragment '{}'", name),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnresolvedFragment {
    pub name: Name,
    pub blocked_on: Vec<BlockedOn>,
    /// Annotations of the fragment with the blocked spreads left out.
    pub partial: TypeMap,
}

impl Display for UnresolvedFragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fragment '{}' depends on ", self.name)?;
        for (idx, blocked_on) in self.blocked_on.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", blocked_on)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FragmentResolution {
    /// Fully resolved fragments, in resolution order.
    pub resolved: IndexMap<Name, TypeMap>,
    pub unresolved: Vec<UnresolvedFragment>,
    pub passes: usize,
}

/// Resolves the type maps of every fragment definition of a document.
///
/// Each pass walks the fragments still pending against the fragments resolved
/// so far. A fragment is resolved once its walk meets no pending spread. The
/// loop stops when nothing is pending or when a pass resolves nothing, so it
/// runs at most one pass more than there are fragments.
pub struct FragmentResolver<'a> {
    schema: &'a Schema,
    fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
}

impl<'a> FragmentResolver<'a> {
    pub fn new(
        schema: &'a Schema,
        fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> Self {
        Self { schema, fragments }
    }

    pub fn resolve(&self) -> FragmentResolution {
        let mut pending = self.fragments.iter().collect::<Vec<_>>();
        pending.sort_by_key(|(_, fragment)| (fragment.pos.line, fragment.pos.column));

        let mut resolution = FragmentResolution::default();
        let mut stalled = Vec::new();

        while !pending.is_empty() {
            resolution.passes += 1;
            let before = pending.len();
            stalled.clear();

            pending.retain(|(name, fragment)| {
                let (type_map, blocked) = self.walk_fragment(&resolution.resolved, &fragment.node);
                if blocked.is_empty() {
                    resolution.resolved.insert((*name).clone(), type_map);
                    false
                } else {
                    stalled.push(((*name).clone(), type_map, blocked));
                    true
                }
            });

            tracing::debug!(
                pass = resolution.passes,
                resolved = resolution.resolved.len(),
                pending = pending.len(),
                "Fragment resolution pass."
            );

            if pending.len() == before {
                break;
            }
        }

        for (name, partial, blocked) in stalled {
            let blocked_on = blocked
                .into_iter()
                .map(|dependency| {
                    if self.fragments.contains_key(&dependency) {
                        BlockedOn::Unresolved(dependency)
                    } else {
                        BlockedOn::Undefined(dependency)
                    }
                })
                .collect();
            let fragment = UnresolvedFragment {
                name,
                blocked_on,
                partial,
            };
            tracing::warn!(
                fragment = %fragment.name,
                reason = %fragment,
                "Fragment could not be resolved."
            );
            resolution.unresolved.push(fragment);
        }

        resolution
    }

    fn walk_fragment(
        &self,
        resolved: &IndexMap<Name, TypeMap>,
        fragment: &FragmentDefinition,
    ) -> (TypeMap, IndexSet<Name>) {
        let mut type_map = TypeMap::new();
        let mut walker = Walker::new(self.schema, resolved);
        walker.walk(
            &mut type_map,
            fragment.type_condition.node.on.node.as_str(),
            &mut Vec::new(),
            &fragment.selection_set.node,
        );
        (type_map, walker.into_blocked())
    }
}
