//! Table title resolution.

use crate::model::TitleBlock;

use super::graph::BlockGraph;

/// Resolves TABLE_TITLE blocks into display strings.
pub struct TitleResolver<'g> {
    graph: &'g BlockGraph,
}

impl<'g> TitleResolver<'g> {
    /// Create a resolver over the given graph.
    pub fn new(graph: &'g BlockGraph) -> Self {
        Self { graph }
    }

    /// Resolve every TABLE_TITLE block, in block order.
    pub fn resolve_all(&self) -> Vec<String> {
        self.graph.titles().map(|title| self.resolve(title)).collect()
    }

    /// Resolve one title.
    ///
    /// Ids from every edge are looked up in the word index in edge-list
    /// order; an id with no WORD block contributes an empty string, so
    /// the separating spaces are kept.
    pub fn resolve(&self, title: &TitleBlock) -> String {
        title
            .related_ids()
            .map(|id| self.graph.word_text(id).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
