//! Renderer dispatch - testers, ranking and the dispatch entry point

pub mod registry;
pub mod tester;

use serde_json::Value;
use tracing::debug;

use crate::core::form::{FormOptions, LocalState};
use crate::core::uischema::UiSchemaNode;
use crate::renderers::widget::Widget;
use crate::renderers::RendererKind;
use crate::schema::generate::UiSchemaRegistry;
use crate::schema::host::SchemaHost;
use crate::schema::validator::ErrorIndex;

pub use registry::{RankedRegistry, Rank, RendererEntry, BASE_RANK, ENUM_RANK, PASSWORD_RANK};
pub use tester::{Tester, TesterContext};

/// What a parent hands to the renderer of one UI Schema element
#[derive(Debug, Clone, Copy)]
pub struct DispatchProps<'a> {
    /// Schema `uischema`'s scope is relative to
    pub schema: &'a Value,
    pub uischema: &'a UiSchemaNode,
    /// Data path of the enclosing element
    pub path: &'a str,
    pub enabled: bool,
    /// Visibility forced by the parent; `None` lets rules decide
    pub visible: Option<bool>,
}

impl<'a> DispatchProps<'a> {
    /// Props for a child element sharing this element's schema, path and enablement
    pub fn child(&self, uischema: &'a UiSchemaNode) -> Self {
        Self {
            uischema,
            visible: None,
            ..*self
        }
    }
}

/// Read-only view of the form shared by every renderer during one render pass
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub root_schema: &'a Value,
    pub data: &'a Value,
    pub errors: &'a ErrorIndex,
    pub registry: &'a RankedRegistry<RendererKind>,
    pub uischemas: &'a UiSchemaRegistry,
    pub host: &'a dyn SchemaHost,
    pub local: &'a LocalState,
    pub options: &'a FormOptions,
}

impl<'a> RenderContext<'a> {
    pub fn tester_context(&self) -> TesterContext<'a> {
        TesterContext::new(Some(self.root_schema), self.host)
    }
}

/// Render one UI Schema element with the best-ranked renderer
///
/// Returns `None` when the element is hidden. An element no renderer
/// accepts yields [`Widget::Unknown`].
pub fn dispatch(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let tester_cx = cx.tester_context();
    match cx.registry.resolve(props.uischema, props.schema, &tester_cx) {
        Some(kind) => {
            debug!(
                kind = %props.uischema.kind,
                scope = ?props.uischema.scope,
                path = props.path,
                renderer = kind.as_str(),
                "dispatch"
            );
            kind.render(props, cx)
        }
        None => Some(Widget::Unknown {
            kind: props.uischema.kind.to_string(),
            scope: props.uischema.scope.clone(),
        }),
    }
}
