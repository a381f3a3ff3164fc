use indexmap::{IndexMap, IndexSet};
use parser::types::{Selection, SelectionSet};
use typehint_schema::Schema;
use value::Name;

use crate::type_map::{TypeMap, TypeNode};

/// Matches selection sets against the schema, one response key at a time.
///
/// Spreads of fragments missing from `fragments` contribute nothing; their
/// names are collected so the caller can tell a complete walk from a partial
/// one.
pub(crate) struct Walker<'a> {
    schema: &'a Schema,
    fragments: &'a IndexMap<Name, TypeMap>,
    blocked: IndexSet<Name>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(schema: &'a Schema, fragments: &'a IndexMap<Name, TypeMap>) -> Self {
        Self {
            schema,
            fragments,
            blocked: Default::default(),
        }
    }

    pub(crate) fn into_blocked(self) -> IndexSet<Name> {
        self.blocked
    }

    /// Adds the annotations of `selection_set` to `type_map`. `path` holds the
    /// field names leading from `root` to the selection set.
    pub(crate) fn walk(
        &mut self,
        type_map: &mut TypeMap,
        root: &'a str,
        path: &mut Vec<&'a str>,
        selection_set: &'a SelectionSet,
    ) {
        for selection in &selection_set.items {
            match &selection.node {
                Selection::Field(field) => {
                    let field = &field.node;
                    let key = field.response_key().node.clone();
                    path.push(field.name.node.as_str());

                    if field.selection_set.node.items.is_empty() {
                        let node = match self.schema.resolve_path(Some(root), path.as_slice()) {
                            Some(name) => TypeNode::resolved(name),
                            None => {
                                tracing::debug!(root, path = ?path, "Field type not found.");
                                TypeNode::Unresolved
                            }
                        };
                        type_map.add_field(key, node);
                    } else {
                        let mut nested = TypeMap::new();
                        self.walk(&mut nested, root, path, &field.selection_set.node);
                        type_map.add_field(key, TypeNode::Nested(nested));
                    }

                    path.pop();
                }
                Selection::FragmentSpread(fragment_spread) => {
                    let name = &fragment_spread.node.fragment_name.node;
                    match self.fragments.get(name) {
                        Some(fragment) => type_map.merge(fragment.clone()),
                        None => {
                            self.blocked.insert(name.clone());
                        }
                    }
                }
                Selection::InlineFragment(inline_fragment) => {
                    let inline_fragment = &inline_fragment.node;
                    match &inline_fragment.type_condition {
                        Some(type_condition) => {
                            let mut fragment_map = TypeMap::new();
                            self.walk(
                                &mut fragment_map,
                                type_condition.node.on.node.as_str(),
                                &mut Vec::new(),
                                &inline_fragment.selection_set.node,
                            );
                            type_map.merge(fragment_map);
                        }
                        None => {
                            self.walk(type_map, root, path, &inline_fragment.selection_set.node)
                        }
                    }
                }
            }
        }
    }
}
