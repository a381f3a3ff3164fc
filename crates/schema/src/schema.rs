use std::collections::HashMap;

use indexmap::IndexMap;
use parser::types::{
    self, FieldDefinition, InterfaceType, ObjectType, OperationType, SchemaDefinition,
    ServiceDocument, Type, TypeDefinition, TypeSystemDefinition,
};
use value::Name;

use crate::type_ext::TypeExt;
use crate::SchemaError;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

#[derive(Debug, Eq, PartialEq)]
pub struct MetaField {
    pub name: Name,
    pub ty: Type,
}

#[derive(Debug, Eq, PartialEq)]
pub struct MetaType {
    pub name: Name,
    pub kind: TypeKind,
    pub fields: IndexMap<Name, MetaField>,
}

impl MetaType {
    #[inline]
    pub fn field_by_name(&self, name: &str) -> Option<&MetaField> {
        self.fields.get(name)
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Object | TypeKind::Interface | TypeKind::Union
        )
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, TypeKind::Enum | TypeKind::Scalar)
    }
}

/// Read-only index from type names to their definitions.
#[derive(Debug, Default)]
pub struct Schema {
    pub(crate) query_type: Option<Name>,
    pub(crate) mutation_type: Option<Name>,
    pub(crate) subscription_type: Option<Name>,
    pub(crate) types: HashMap<Name, MetaType>,
}

impl Schema {
    pub fn parse(document: &str) -> Result<Schema, SchemaError> {
        Ok(Self::new(parser::parse_schema(document)?))
    }

    pub fn new(document: ServiceDocument) -> Schema {
        let mut schema = Schema::default();

        for definition in document.definitions.into_iter() {
            match definition {
                TypeSystemDefinition::Schema(definition) => {
                    convert_schema_definition(&mut schema, definition.node);
                }
                TypeSystemDefinition::Type(definition) => {
                    let is_extend = definition.node.extend;
                    let meta_type = convert_type_definition(definition.node);
                    match schema.types.get_mut(&meta_type.name) {
                        Some(existing) if is_extend => existing.fields.extend(meta_type.fields),
                        _ => {
                            schema.types.insert(meta_type.name.clone(), meta_type);
                        }
                    }
                }
                TypeSystemDefinition::Directive(_) => {}
            }
        }

        finish_schema(&mut schema);
        schema
    }

    #[inline]
    pub fn query_type(&self) -> &str {
        self.query_type
            .as_ref()
            .map(|name| name.as_str())
            .unwrap_or("Query")
    }

    #[inline]
    pub fn mutation_type(&self) -> &str {
        self.mutation_type
            .as_ref()
            .map(|name| name.as_str())
            .unwrap_or("Mutation")
    }

    #[inline]
    pub fn subscription_type(&self) -> &str {
        self.subscription_type
            .as_ref()
            .map(|name| name.as_str())
            .unwrap_or("Subscription")
    }

    pub fn root_type(&self, ty: OperationType) -> &str {
        match ty {
            OperationType::Query => self.query_type(),
            OperationType::Mutation => self.mutation_type(),
            OperationType::Subscription => self.subscription_type(),
        }
    }

    #[inline]
    pub fn type_by_name(&self, name: &str) -> Option<&MetaType> {
        self.types.get(name)
    }

    /// Looks up the named type behind any list and non-null modifiers.
    #[inline]
    pub fn get_type(&self, ty: &Type) -> Option<&MetaType> {
        self.types.get(ty.concrete_typename())
    }

    /// Walks `path` field by field starting at `root` (the query root when
    /// `None`) and returns the name of the named type of the last field.
    ///
    /// Returns `None` when the root type is unknown, when a segment is not a
    /// field of the current type, or when a type without fields is reached
    /// before the path ends.
    pub fn resolve_path<'a>(&'a self, root: Option<&str>, path: &[&str]) -> Option<&'a str> {
        let (last, parents) = path.split_last()?;
        let mut ty = self
            .types
            .get(root.unwrap_or_else(|| self.query_type()))?;

        for name in parents {
            let field = ty.field_by_name(name)?;
            ty = self.get_type(&field.ty)?;
        }

        if *last == "__typename" && ty.is_composite() {
            return Some("String");
        }
        ty.field_by_name(last)
            .map(|field| field.ty.concrete_typename())
    }
}

fn convert_schema_definition(schema: &mut Schema, definition: SchemaDefinition) {
    if let Some(query) = definition.query {
        schema.query_type = Some(query.node);
    }
    if let Some(mutation) = definition.mutation {
        schema.mutation_type = Some(mutation.node);
    }
    if let Some(subscription) = definition.subscription {
        schema.subscription_type = Some(subscription.node);
    }
}

fn convert_type_definition(definition: TypeDefinition) -> MetaType {
    let mut meta_type = MetaType {
        name: definition.name.node,
        kind: TypeKind::Scalar,
        fields: Default::default(),
    };

    match definition.kind {
        types::TypeKind::Scalar => meta_type.kind = TypeKind::Scalar,
        types::TypeKind::Object(ObjectType { fields, .. }) => {
            meta_type.kind = TypeKind::Object;
            meta_type.fields = convert_fields(fields);
        }
        types::TypeKind::Interface(InterfaceType { fields, .. }) => {
            meta_type.kind = TypeKind::Interface;
            meta_type.fields = convert_fields(fields);
        }
        types::TypeKind::Union(_) => meta_type.kind = TypeKind::Union,
        types::TypeKind::Enum(_) => meta_type.kind = TypeKind::Enum,
        types::TypeKind::InputObject(_) => meta_type.kind = TypeKind::InputObject,
    }

    meta_type
}

fn convert_fields(
    fields: Vec<parser::Positioned<FieldDefinition>>,
) -> IndexMap<Name, MetaField> {
    fields
        .into_iter()
        .map(|field| {
            (
                field.node.name.node.clone(),
                convert_field_definition(field.node),
            )
        })
        .collect()
}

fn convert_field_definition(definition: FieldDefinition) -> MetaField {
    MetaField {
        name: definition.name.node,
        ty: definition.ty.node,
    }
}

pub(crate) fn finish_schema(schema: &mut Schema) {
    for definition in parser::parse_schema(include_str!("builtin.graphql"))
        .unwrap()
        .definitions
        .into_iter()
    {
        if let TypeSystemDefinition::Type(definition) = definition {
            let meta_type = convert_type_definition(definition.node);
            schema
                .types
                .entry(meta_type.name.clone())
                .or_insert(meta_type);
        }
    }

    let query_type = Name::new(schema.query_type());
    if let Some(query_type) = schema.types.get_mut(&query_type) {
        for (name, ty) in [("__schema", "__Schema!"), ("__type", "__Type")] {
            let name = Name::new(name);
            query_type.fields.entry(name.clone()).or_insert(MetaField {
                name,
                ty: Type::new(ty).unwrap(),
            });
        }
    }
}
