use parser::types::{DocumentOperations, ExecutableDocument, OperationDefinition};
use typehint_schema::Schema;
use value::Name;

use crate::fragment::{FragmentResolver, UnresolvedFragment};
use crate::type_map::TypeMap;
use crate::walker::Walker;
use crate::Error;

/// Type annotations of a query, shaped like its result.
#[derive(Debug, Clone, Default)]
pub struct TypeAnnotations {
    pub types: TypeMap,
    pub unresolved_fragments: Vec<UnresolvedFragment>,
    /// Fragments spread by an operation but never defined.
    pub undefined_fragments: Vec<Name>,
}

impl TypeAnnotations {
    pub fn from_source(schema: &Schema, query: &str) -> Result<Self, Error> {
        let document = parser::parse_query(query)?;
        TypeMapBuilder::new(schema, &document).build()
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved_fragments.is_empty() && self.undefined_fragments.is_empty()
    }

    /// Returns the type map, failing if any fragment was left unresolved.
    pub fn into_resolved(self) -> Result<TypeMap, Error> {
        if !self.unresolved_fragments.is_empty() {
            return Err(Error::UnresolvedFragments(self.unresolved_fragments));
        }
        if !self.undefined_fragments.is_empty() {
            return Err(Error::UndefinedFragments(self.undefined_fragments));
        }
        Ok(self.types)
    }
}

/// Type map generator
pub struct TypeMapBuilder<'a> {
    schema: &'a Schema,
    document: &'a ExecutableDocument,
    operation_name: Option<String>,
    strict: bool,
}

impl<'a> TypeMapBuilder<'a> {
    pub fn new(schema: &'a Schema, document: &'a ExecutableDocument) -> Self {
        Self {
            schema,
            document,
            operation_name: None,
            strict: false,
        }
    }

    /// Annotates only the named operation instead of every operation.
    pub fn operation_name(mut self, operation: impl Into<String>) -> Self {
        self.operation_name = Some(operation.into());
        self
    }

    /// Fails the build instead of returning partial annotations when a
    /// fragment cannot be resolved.
    pub fn strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }

    pub fn build(&self) -> Result<TypeAnnotations, Error> {
        let operations = get_operations(self.document, self.operation_name.as_deref())?;
        let resolution = FragmentResolver::new(self.schema, &self.document.fragments).resolve();

        let mut fragments = resolution.resolved;
        for fragment in &resolution.unresolved {
            fragments.insert(fragment.name.clone(), fragment.partial.clone());
        }

        let mut types = TypeMap::new();
        let mut walker = Walker::new(self.schema, &fragments);
        for operation in operations {
            walker.walk(
                &mut types,
                self.schema.root_type(operation.ty),
                &mut Vec::new(),
                &operation.selection_set.node,
            );
        }

        let undefined_fragments = walker.into_blocked().into_iter().collect::<Vec<_>>();
        for name in &undefined_fragments {
            tracing::warn!(fragment = %name, "Spread of an undefined fragment was skipped.");
        }

        let annotations = TypeAnnotations {
            types,
            unresolved_fragments: resolution.unresolved,
            undefined_fragments,
        };
        if self.strict {
            annotations.into_resolved().map(|types| TypeAnnotations {
                types,
                ..Default::default()
            })
        } else {
            Ok(annotations)
        }
    }
}

/// Operations to annotate, in document order.
fn get_operations<'a>(
    document: &'a ExecutableDocument,
    operation_name: Option<&str>,
) -> Result<Vec<&'a OperationDefinition>, Error> {
    match (&document.operations, operation_name) {
        (DocumentOperations::Single(operation), None) => Ok(vec![&operation.node]),
        (DocumentOperations::Single(_), Some(operation_name)) => {
            Err(Error::UnknownOperation(operation_name.to_string()))
        }
        (DocumentOperations::Multiple(operations), Some(operation_name)) => operations
            .get(operation_name)
            .map(|operation| vec![&operation.node])
            .ok_or_else(|| Error::UnknownOperation(operation_name.to_string())),
        (DocumentOperations::Multiple(operations), None) => {
            let mut operations = operations.values().collect::<Vec<_>>();
            operations.sort_by_key(|operation| (operation.pos.line, operation.pos.column));
            Ok(operations
                .into_iter()
                .map(|operation| &operation.node)
                .collect())
        }
    }
}
