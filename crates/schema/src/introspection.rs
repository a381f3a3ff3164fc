use parser::types::{BaseType, Type};
use serde::Deserialize;
use value::Name;

use crate::schema::{finish_schema, MetaField, MetaType, Schema, TypeKind};
use crate::SchemaError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntrospectionResponse {
    Data { data: IntrospectionData },
    Bare(IntrospectionData),
}

#[derive(Debug, Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<NamedRef>,
    mutation_type: Option<NamedRef>,
    subscription_type: Option<NamedRef>,
    types: Vec<FullType>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum Kind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

#[derive(Debug, Deserialize)]
struct FullType {
    kind: Kind,
    name: Option<String>,
    #[serde(default)]
    fields: Option<Vec<IntrospectionField>>,
}

#[derive(Debug, Deserialize)]
struct IntrospectionField {
    name: String,
    #[serde(rename = "type")]
    ty: TypeRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeRef {
    kind: Kind,
    name: Option<String>,
    of_type: Option<Box<TypeRef>>,
}

impl Schema {
    /// Builds a schema from the JSON result of the standard introspection
    /// query, with or without the surrounding `data` object.
    pub fn from_introspection(json: &str) -> Result<Schema, SchemaError> {
        let data = match serde_json::from_str(json)? {
            IntrospectionResponse::Data { data } => data,
            IntrospectionResponse::Bare(data) => data,
        };
        let introspection = data.schema;

        let mut schema = Schema {
            query_type: introspection.query_type.map(|ty| Name::new(ty.name)),
            mutation_type: introspection.mutation_type.map(|ty| Name::new(ty.name)),
            subscription_type: introspection
                .subscription_type
                .map(|ty| Name::new(ty.name)),
            types: Default::default(),
        };

        for (index, full_type) in introspection.types.into_iter().enumerate() {
            let meta_type = convert_full_type(index, full_type)?;
            schema.types.insert(meta_type.name.clone(), meta_type);
        }

        finish_schema(&mut schema);
        Ok(schema)
    }
}

fn convert_full_type(index: usize, full_type: FullType) -> Result<MetaType, SchemaError> {
    let name = full_type
        .name
        .ok_or(SchemaError::MissingTypeName { index })?;
    let kind = match full_type.kind {
        Kind::Scalar => TypeKind::Scalar,
        Kind::Object => TypeKind::Object,
        Kind::Interface => TypeKind::Interface,
        Kind::Union => TypeKind::Union,
        Kind::Enum => TypeKind::Enum,
        Kind::InputObject => TypeKind::InputObject,
        Kind::List | Kind::NonNull => {
            return Err(SchemaError::InvalidTypeRef { context: name });
        }
    };

    let mut fields = indexmap::IndexMap::new();
    for field in full_type.fields.unwrap_or_default() {
        let ty = convert_type_ref(&field.ty).ok_or_else(|| SchemaError::InvalidTypeRef {
            context: format!("{}.{}", name, field.name),
        })?;
        let field_name = Name::new(&field.name);
        fields.insert(
            field_name.clone(),
            MetaField {
                name: field_name,
                ty,
            },
        );
    }

    Ok(MetaType {
        name: Name::new(name),
        kind,
        fields,
    })
}

fn convert_type_ref(type_ref: &TypeRef) -> Option<Type> {
    match type_ref.kind {
        Kind::NonNull => {
            let inner = type_ref.of_type.as_deref()?;
            if inner.kind == Kind::NonNull {
                return None;
            }
            let mut ty = convert_type_ref(inner)?;
            ty.nullable = false;
            Some(ty)
        }
        Kind::List => Some(Type {
            base: BaseType::List(Box::new(convert_type_ref(type_ref.of_type.as_deref()?)?)),
            nullable: true,
        }),
        _ => Some(Type {
            base: BaseType::Named(Name::new(type_ref.name.as_deref()?)),
            nullable: true,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeExt;

    const INTROSPECTION: &str = r#"{
        "data": {
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "subscriptionType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "description": null,
                        "fields": [
                            {
                                "name": "posts",
                                "description": "All posts",
                                "args": [],
                                "type": {
                                    "kind": "NON_NULL",
                                    "name": null,
                                    "ofType": {
                                        "kind": "LIST",
                                        "name": null,
                                        "ofType": {
                                            "kind": "NON_NULL",
                                            "name": null,
                                            "ofType": { "kind": "OBJECT", "name": "Post", "ofType": null }
                                        }
                                    }
                                },
                                "isDeprecated": false,
                                "deprecationReason": null
                            }
                        ],
                        "interfaces": []
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Post",
                        "description": null,
                        "fields": [
                            {
                                "name": "title",
                                "description": null,
                                "args": [],
                                "type": { "kind": "SCALAR", "name": "String", "ofType": null },
                                "isDeprecated": false,
                                "deprecationReason": null
                            }
                        ],
                        "interfaces": []
                    },
                    { "kind": "SCALAR", "name": "String", "description": null, "fields": null }
                ]
            }
        }
    }"#;

    #[test]
    fn loads_introspection_result() {
        let schema = Schema::from_introspection(INTROSPECTION).unwrap();
        let posts = schema
            .type_by_name("Query")
            .and_then(|ty| ty.field_by_name("posts"))
            .unwrap();
        assert_eq!(posts.ty.to_string(), "[Post!]!");
        assert_eq!(schema.resolve_path(None, &["posts", "title"]), Some("String"));
        assert_eq!(
            schema.resolve_path(None, &["__schema", "types", "name"]),
            Some("String")
        );
    }

    #[test]
    fn accepts_bare_schema_and_rejects_unnamed_types() {
        let schema = Schema::from_introspection(
            r#"{ "__schema": { "queryType": { "name": "Q" }, "types": [
                { "kind": "OBJECT", "name": "Q", "fields": [
                    { "name": "n", "type": { "kind": "SCALAR", "name": "Int" } }
                ] }
            ] } }"#,
        )
        .unwrap();
        assert_eq!(schema.query_type(), "Q");
        assert_eq!(schema.resolve_path(None, &["n"]), Some("Int"));

        let err = Schema::from_introspection(
            r#"{ "__schema": { "types": [ { "kind": "OBJECT", "name": null } ] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingTypeName { index: 0 }));
    }
}
