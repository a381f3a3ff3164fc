use parser::types::{BaseType, Type};

pub trait TypeExt {
    /// Name of the type with every list and non-null modifier removed.
    fn concrete_typename(&self) -> &str;
}

impl TypeExt for Type {
    fn concrete_typename(&self) -> &str {
        match &self.base {
            BaseType::Named(name) => name.as_str(),
            BaseType::List(ty) => ty.concrete_typename(),
        }
    }
}
