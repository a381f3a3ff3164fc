#![forbid(unsafe_code)]

mod error;
mod introspection;
mod schema;
mod type_ext;

pub use error::SchemaError;
pub use schema::{MetaField, MetaType, Schema, TypeKind};
pub use type_ext::TypeExt;
