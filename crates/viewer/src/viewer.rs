use std::sync::Arc;

use serde::Serialize;
use typehint_annotator::{HoverType, TypeAnnotations, TypeMap};
use typehint_schema::Schema;

use crate::host::{EditorHost, EditorOptions};
use crate::token::{result_path, Token};
use crate::Error;

/// Inputs of the viewer. `query` is the source text of the query whose
/// result is shown in `value`.
#[derive(Debug, Clone, Default)]
pub struct ViewerProps {
    pub schema: Option<Arc<Schema>>,
    pub query: Option<String>,
    pub value: Option<String>,
    pub hide_gutters: bool,
    pub tooltip: bool,
}

/// What the tooltip shows for a hovered token.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct HoverInfo {
    pub value: String,
    #[serde(rename = "type")]
    pub ty: Option<HoverType>,
}

/// Read-only view of a query result with type tooltips.
pub struct ResultViewer<H> {
    host: Option<H>,
    props: ViewerProps,
    hover_enabled: bool,
    types: Option<TypeMap>,
}

impl<H: EditorHost> ResultViewer<H> {
    pub fn mount(mut host: H, props: ViewerProps) -> Result<Self, Error> {
        let types = build_types(&props)?;
        host.mount(&EditorOptions {
            value: props.value.clone().unwrap_or_default(),
            read_only: true,
            line_wrapping: true,
            fold_gutter: !props.hide_gutters,
            hover_info: props.tooltip,
        });

        Ok(Self {
            host: Some(host),
            hover_enabled: props.tooltip,
            props,
            types,
        })
    }

    /// Applies new props. The editor is only touched when the result text or
    /// the query changed; returns whether it was.
    pub fn update(&mut self, props: ViewerProps) -> Result<bool, Error> {
        if props.value == self.props.value && props.query == self.props.query {
            self.props = props;
            return Ok(false);
        }

        self.types = build_types(&props)?;
        if let Some(host) = &mut self.host {
            host.set_value(props.value.as_deref().unwrap_or_default());
        }
        self.props = props;
        Ok(true)
    }

    pub fn unmount(&mut self) -> Option<H> {
        let mut host = self.host.take()?;
        host.unmount();
        Some(host)
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn type_map(&self) -> Option<&TypeMap> {
        self.types.as_ref()
    }

    /// Hover info for `token`, or `None` when tooltips are disabled.
    pub fn hover(&self, token: &Token) -> Option<HoverInfo> {
        if !self.hover_enabled {
            return None;
        }

        let path = result_path(&token.state);
        let ty = self.types.as_ref().and_then(|types| {
            // The response envelope is not part of the query.
            let path = match path.split_first() {
                Some((first, rest)) if first == "data" && !types.contains_key("data") => rest,
                _ => &path[..],
            };
            types.lookup(path).and_then(HoverType::from_node)
        });

        Some(HoverInfo {
            value: token.string.clone(),
            ty,
        })
    }
}

fn build_types(props: &ViewerProps) -> Result<Option<TypeMap>, Error> {
    match (&props.schema, &props.query) {
        (Some(schema), Some(query)) => {
            let annotations = TypeAnnotations::from_source(schema, query)?;
            Ok(Some(annotations.types))
        }
        (None, Some(_)) => {
            tracing::debug!("No schema available, type tooltips are disabled.");
            Ok(None)
        }
        _ => Ok(None),
    }
}
