use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to parse schema: {0}")]
    Parse(#[from] parser::Error),

    #[error("Failed to decode introspection result: {0}")]
    Introspection(#[from] serde_json::Error),

    #[error("Introspection type #{index} has no name.")]
    MissingTypeName { index: usize },

    #[error("Type reference '{context}' is not valid.")]
    InvalidTypeRef { context: String },
}
