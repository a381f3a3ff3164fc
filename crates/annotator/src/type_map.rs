use std::ops::Deref;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use value::Name;

/// Type annotation of a single response key.
///
/// Serializes to the JSON shape of the result it describes: a type name, `null`,
/// a nested object or an array of candidates.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeNode {
    Resolved(Name),
    Unresolved,
    Nested(TypeMap),
    /// Candidates contributed by different fragment branches, newest first.
    /// Never contains another `Ambiguous`.
    Ambiguous(Vec<TypeNode>),
}

impl TypeNode {
    pub fn resolved(name: impl AsRef<str>) -> Self {
        TypeNode::Resolved(Name::new(name))
    }

    fn into_candidates(self) -> Vec<TypeNode> {
        match self {
            TypeNode::Ambiguous(candidates) => candidates,
            node => vec![node],
        }
    }

    fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&TypeNode> {
        let (key, rest) = match path.split_first() {
            Some(split) => split,
            None => return Some(self),
        };
        match self {
            TypeNode::Nested(map) => map.get(key.as_ref())?.lookup(rest),
            TypeNode::Ambiguous(candidates) => candidates
                .iter()
                .find_map(|candidate| candidate.lookup(path)),
            TypeNode::Resolved(_) | TypeNode::Unresolved => None,
        }
    }
}

/// Response key to type annotation, in selection order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeMap(IndexMap<Name, TypeNode>);

impl Deref for TypeMap {
    type Target = IndexMap<Name, TypeNode>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<(Name, TypeNode)> for TypeMap {
    fn from_iter<T: IntoIterator<Item = (Name, TypeNode)>>(iter: T) -> Self {
        TypeMap(iter.into_iter().collect())
    }
}

impl IntoIterator for TypeMap {
    type Item = (Name, TypeNode);
    type IntoIter = indexmap::map::IntoIter<Name, TypeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the annotation of a field selected under `key`. A field repeated
    /// with a selection set extends the nested map already stored there; any
    /// other clash follows [`TypeMap::merge`].
    pub(crate) fn add_field(&mut self, key: Name, node: TypeNode) {
        let node = match (self.0.get_mut(&key), node) {
            (Some(TypeNode::Nested(existing)), TypeNode::Nested(nested)) => {
                for (key, node) in nested {
                    existing.add_field(key, node);
                }
                return;
            }
            (_, node) => node,
        };
        self.merge(TypeMap::from_iter([(key, node)]));
    }

    /// Merges `other` into this map. A key present on both sides becomes an
    /// `Ambiguous` list holding the values of `other` followed by the values
    /// already here.
    pub fn merge(&mut self, other: TypeMap) {
        for (key, value) in other.0 {
            match self.0.get_mut(&key) {
                Some(slot) => {
                    let mut candidates = value.into_candidates();
                    candidates
                        .extend(std::mem::replace(slot, TypeNode::Unresolved).into_candidates());
                    *slot = TypeNode::Ambiguous(candidates);
                }
                None => {
                    self.0.insert(key, value);
                }
            }
        }
    }

    /// Follows `path` of response keys down the tree. List indices of the
    /// result do not appear in the path.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&TypeNode> {
        let (key, rest) = path.split_first()?;
        self.0.get(key.as_ref())?.lookup(rest)
    }
}

/// Type shown for a hovered result value.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HoverType {
    Single(Name),
    Candidates(Vec<Name>),
}

impl HoverType {
    /// Collapses candidates that all agree into a single name. Nested maps and
    /// unresolved entries carry no hover type.
    pub fn from_node(node: &TypeNode) -> Option<Self> {
        match node {
            TypeNode::Resolved(name) => Some(HoverType::Single(name.clone())),
            TypeNode::Ambiguous(candidates) => {
                let mut names = candidates
                    .iter()
                    .filter_map(|candidate| match candidate {
                        TypeNode::Resolved(name) => Some(name.clone()),
                        _ => None,
                    })
                    .collect::<IndexSet<_>>();
                match names.len() {
                    0 => None,
                    1 => names.pop().map(HoverType::Single),
                    _ => Some(HoverType::Candidates(names.into_iter().collect())),
                }
            }
            TypeNode::Nested(_) | TypeNode::Unresolved => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map<const N: usize>(entries: [(&str, TypeNode); N]) -> TypeMap {
        entries
            .into_iter()
            .map(|(key, node)| (Name::new(key), node))
            .collect()
    }

    fn ty(name: &str) -> TypeNode {
        TypeNode::resolved(name)
    }

    #[test]
    fn merge_disjoint_keys() {
        let mut a = map([("x", ty("Int"))]);
        a.merge(map([("y", ty("String"))]));
        assert_eq!(a, map([("x", ty("Int")), ("y", ty("String"))]));
    }

    #[test]
    fn merge_clash_puts_new_value_first() {
        let mut a = map([("k", ty("A"))]);
        a.merge(map([("k", ty("B"))]));
        assert_eq!(a, map([("k", TypeNode::Ambiguous(vec![ty("B"), ty("A")]))]));

        let mut a = map([("k", TypeNode::Ambiguous(vec![ty("A"), ty("B")]))]);
        a.merge(map([("k", ty("C"))]));
        assert_eq!(
            a,
            map([("k", TypeNode::Ambiguous(vec![ty("C"), ty("A"), ty("B")]))])
        );

        let mut a = map([("k", ty("A"))]);
        a.merge(map([("k", TypeNode::Ambiguous(vec![ty("B"), ty("C")]))]));
        assert_eq!(
            a,
            map([("k", TypeNode::Ambiguous(vec![ty("B"), ty("C"), ty("A")]))])
        );
    }

    #[test]
    fn merge_keeps_key_order() {
        let mut a = map([("a", ty("Int")), ("b", ty("Int"))]);
        a.merge(map([("a", ty("Int")), ("c", ty("Int"))]));
        assert_eq!(a.keys().map(|key| key.as_str()).collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn repeated_fields_extend_nested_maps() {
        let mut a = map([("me", TypeNode::Nested(map([("id", ty("ID"))])))]);
        a.add_field(
            Name::new("me"),
            TypeNode::Nested(map([("name", ty("String")), ("id", ty("ID"))])),
        );
        assert_eq!(
            a,
            map([(
                "me",
                TypeNode::Nested(map([
                    ("id", TypeNode::Ambiguous(vec![ty("ID"), ty("ID")])),
                    ("name", ty("String")),
                ]))
            )])
        );
    }

    #[test]
    fn repeated_fields_keep_fragment_candidates() {
        let mut a = map([(
            "c",
            TypeNode::Ambiguous(vec![
                TypeNode::Nested(map([("n", ty("Int"))])),
                TypeNode::Nested(map([("x", ty("ID"))])),
            ]),
        )]);
        a.add_field(Name::new("c"), TypeNode::Nested(map([("b", ty("String"))])));
        assert_eq!(a.lookup(&["c", "b"]), Some(&ty("String")));
        assert_eq!(a.lookup(&["c", "n"]), Some(&ty("Int")));
        assert_eq!(a.lookup(&["c", "x"]), Some(&ty("ID")));

        let mut a = map([("b", ty("String"))]);
        a.add_field(Name::new("b"), ty("String"));
        assert_eq!(
            a,
            map([("b", TypeNode::Ambiguous(vec![ty("String"), ty("String")]))])
        );
    }

    #[test]
    fn serializes_like_the_result() {
        let node = map([
            ("id", ty("ID")),
            ("missing", TypeNode::Unresolved),
            ("name", TypeNode::Ambiguous(vec![ty("String"), ty("String")])),
            ("friend", TypeNode::Nested(map([("id", ty("ID"))]))),
        ]);
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({
                "id": "ID",
                "missing": null,
                "name": ["String", "String"],
                "friend": { "id": "ID" },
            })
        );
    }

    #[test]
    fn lookup_descends_through_candidates() {
        let types = map([(
            "node",
            TypeNode::Ambiguous(vec![
                TypeNode::Nested(map([("name", ty("String"))])),
                TypeNode::Nested(map([("price", ty("Int"))])),
            ]),
        )]);
        assert_eq!(types.lookup(&["node", "price"]), Some(&ty("Int")));
        assert_eq!(types.lookup(&["node", "name"]), Some(&ty("String")));
        assert_eq!(types.lookup(&["node", "other"]), None);
        assert_eq!(types.lookup::<&str>(&[]), None);
    }

    #[test]
    fn hover_type_collapses_agreeing_candidates() {
        assert_eq!(
            HoverType::from_node(&TypeNode::Ambiguous(vec![ty("Int"), ty("Int")])),
            Some(HoverType::Single(Name::new("Int")))
        );
        assert_eq!(
            HoverType::from_node(&TypeNode::Ambiguous(vec![ty("Int"), ty("ID")])),
            Some(HoverType::Candidates(vec![Name::new("Int"), Name::new("ID")]))
        );
        assert_eq!(HoverType::from_node(&TypeNode::Unresolved), None);
        assert_eq!(HoverType::from_node(&TypeNode::Nested(TypeMap::new())), None);
    }
}
