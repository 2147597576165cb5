//! Ranked renderer registry
//!
//! Each entry pairs a [`Tester`] with a rank. Dispatch asks every entry and
//! keeps the highest rank among the testers that hold; on a tie the entry
//! registered first wins. Registration order is therefore part of the
//! contract and [`RankedRegistry::register`] never reorders.

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::uischema::UiSchemaNode;
use crate::dispatch::tester::{Tester, TesterContext};

pub type Rank = i32;

/// Rank of the generic renderers
pub const BASE_RANK: Rank = 10;
/// Enum renderers must beat the plain string renderer
pub const ENUM_RANK: Rank = 11;
/// Password beats both
pub const PASSWORD_RANK: Rank = 12;

#[derive(Debug, Clone)]
pub struct RendererEntry<R> {
    pub tester: Tester,
    pub rank: Rank,
    pub renderer: R,
}

#[derive(Debug, Clone)]
pub struct RankedRegistry<R> {
    entries: Vec<RendererEntry<R>>,
}

impl<R> Default for RankedRegistry<R> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<R> RankedRegistry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tester: Tester, rank: Rank, renderer: R) -> &mut Self {
        self.entries.push(RendererEntry {
            tester,
            rank,
            renderer,
        });
        self
    }

    pub fn entries(&self) -> &[RendererEntry<R>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The winning entry for `uischema`, if any tester holds
    pub fn resolve_entry(
        &self,
        uischema: &UiSchemaNode,
        schema: &Value,
        cx: &TesterContext<'_>,
    ) -> Option<&RendererEntry<R>> {
        let mut best: Option<&RendererEntry<R>> = None;
        for entry in &self.entries {
            if !entry.tester.test(uischema, schema, cx) {
                continue;
            }
            trace!(tester = entry.tester.name(), rank = entry.rank, "tester holds");
            if best.map_or(true, |b| entry.rank > b.rank) {
                best = Some(entry);
            }
        }
        if best.is_none() {
            debug!(kind = %uischema.kind, scope = ?uischema.scope, "no renderer applies");
        }
        best
    }

    pub fn resolve(&self, uischema: &UiSchemaNode, schema: &Value, cx: &TesterContext<'_>) -> Option<&R> {
        self.resolve_entry(uischema, schema, cx).map(|e| &e.renderer)
    }

    /// Every applicable entry, best first (rank descending, then registration order)
    pub fn candidates(
        &self,
        uischema: &UiSchemaNode,
        schema: &Value,
        cx: &TesterContext<'_>,
    ) -> Vec<(usize, &RendererEntry<R>)> {
        let mut matching: Vec<_> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.tester.test(uischema, schema, cx))
            .collect();
        matching.sort_by(|(ia, a), (ib, b)| b.rank.cmp(&a.rank).then(ia.cmp(ib)));
        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::uischema::UiType;
    use crate::dispatch::tester::{is_control, ui_type_is};
    use crate::schema::host::JsonFormsHost;
    use serde_json::json;

    static HOST: JsonFormsHost = JsonFormsHost;

    fn always(name: &'static str) -> Tester {
        Tester::new(name, |_, _, _| true)
    }

    #[test]
    fn test_highest_rank_wins() {
        let mut registry = RankedRegistry::new();
        registry
            .register(always("a"), BASE_RANK, "a")
            .register(always("b"), PASSWORD_RANK, "b")
            .register(always("c"), ENUM_RANK, "c");

        let schema = json!({});
        let cx = TesterContext::new(Some(&schema), &HOST);
        assert_eq!(registry.resolve(&UiSchemaNode::control("#"), &schema, &cx), Some(&"b"));
    }

    #[test]
    fn test_tie_goes_to_first_registration() {
        let mut registry = RankedRegistry::new();
        registry
            .register(always("first"), BASE_RANK, 1)
            .register(always("second"), BASE_RANK, 2);

        let schema = json!({});
        let cx = TesterContext::new(Some(&schema), &HOST);
        let ui = UiSchemaNode::control("#");
        for _ in 0..10 {
            assert_eq!(registry.resolve(&ui, &schema, &cx), Some(&1));
        }
    }

    #[test]
    fn test_failing_testers_are_skipped() {
        let mut registry = RankedRegistry::new();
        registry
            .register(ui_type_is(UiType::Group), 100, "group")
            .register(is_control(), BASE_RANK, "control");

        let schema = json!({});
        let cx = TesterContext::new(Some(&schema), &HOST);
        assert_eq!(registry.resolve(&UiSchemaNode::control("#"), &schema, &cx), Some(&"control"));
        assert_eq!(registry.resolve(&UiSchemaNode::new(UiType::Label), &schema, &cx), None);
    }

    #[test]
    fn test_candidates_order() {
        let mut registry = RankedRegistry::new();
        registry
            .register(always("low"), 1, "low")
            .register(always("high-a"), 5, "high-a")
            .register(Tester::new("never", |_, _, _| false), 9, "never")
            .register(always("high-b"), 5, "high-b");

        let schema = json!({});
        let cx = TesterContext::new(Some(&schema), &HOST);
        let order: Vec<_> = registry
            .candidates(&UiSchemaNode::control("#"), &schema, &cx)
            .into_iter()
            .map(|(i, e)| (i, e.renderer))
            .collect();
        assert_eq!(order, vec![(1, "high-a"), (3, "high-b"), (0, "low")]);
    }
}
