//! View reconciliation.
//!
//! [`ViewReconciler`] holds what the results area currently shows and decides
//! which source to refresh from. The rule is one line: an active search
//! re-runs, otherwise recent entries reload. Everything it displays is a
//! function of the search state and the data last received.

use super::controller::{SearchController, ViewTarget};
use super::loader::CatalogLoader;
use crate::domain::{Entry, Result};
use crate::worker::{TicketIssuer, WorkerMessage};

/// Placeholder text for a failed search.
pub const SEARCH_FAILED: &str = "Error performing search. Please try again.";

/// Placeholder text for a failed recent-entries load.
pub const RECENT_FAILED: &str = "Error loading entries.";

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewContent {
    /// A request for `target` is outstanding.
    Loading(ViewTarget),
    /// A rendered list, possibly empty.
    Entries { target: ViewTarget, entries: Vec<Entry> },
    /// An inline error placeholder.
    Failed { target: ViewTarget, message: String },
}

impl ViewContent {
    #[must_use]
    pub const fn target(&self) -> ViewTarget {
        match self {
            Self::Loading(target) | Self::Entries { target, .. } | Self::Failed { target, .. } => *target,
        }
    }

    /// The displayed entries, empty unless a list is rendered.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        match self {
            Self::Entries { entries, .. } => entries,
            Self::Loading(_) | Self::Failed { .. } => &[],
        }
    }
}

/// Owner of the visible results area.
///
/// `revision` increments on every render, so callers can tell whether an
/// event changed what is on screen.
#[derive(Debug)]
pub struct ViewReconciler {
    content: ViewContent,
    revision: u64,
}

impl Default for ViewReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewReconciler {
    /// Starts in the loading state for recent entries.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: ViewContent::Loading(ViewTarget::RecentEntries),
            revision: 0,
        }
    }

    #[must_use]
    pub const fn content(&self) -> &ViewContent {
        &self.content
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    fn render(&mut self, content: ViewContent) {
        self.content = content;
        self.revision += 1;
    }

    pub fn show_loading(&mut self, target: ViewTarget) {
        self.render(ViewContent::Loading(target));
    }

    /// Renders a search response.
    pub fn publish_search(&mut self, result: Result<Vec<Entry>>) {
        self.publish(ViewTarget::SearchResults, result, SEARCH_FAILED);
    }

    /// Renders a recent-entries response.
    pub fn publish_recent(&mut self, result: Result<Vec<Entry>>) {
        self.publish(ViewTarget::RecentEntries, result, RECENT_FAILED);
    }

    fn publish(&mut self, target: ViewTarget, result: Result<Vec<Entry>>, failure: &str) {
        match result {
            Ok(entries) => {
                tracing::debug!(?target, count = entries.len(), "view rendered");
                self.render(ViewContent::Entries { target, entries });
            }
            Err(e) => {
                tracing::warn!(?target, kind = ?e.kind(), error = %e, "view load failed");
                self.render(ViewContent::Failed {
                    target,
                    message: failure.to_string(),
                });
            }
        }
    }

    /// Shows recent entries after a search is cleared.
    ///
    /// Uses the loader's cached list when there is one; otherwise shows a
    /// loading placeholder and returns the load request to post.
    pub fn show_recent(&mut self, loader: &mut CatalogLoader, tickets: &mut TicketIssuer) -> Option<WorkerMessage> {
        if let Some(cached) = loader.cached() {
            let entries = cached.to_vec();
            self.render(ViewContent::Entries {
                target: ViewTarget::RecentEntries,
                entries,
            });
            return None;
        }
        if loader.is_loading() {
            self.show_loading(ViewTarget::RecentEntries);
            return None;
        }
        self.show_loading(ViewTarget::RecentEntries);
        Some(loader.load_recent(tickets))
    }

    /// Refreshes the authoritative view from its source.
    ///
    /// An active search re-runs with its committed query; otherwise recent
    /// entries reload. Returns the single request to post.
    pub fn reconcile(
        &mut self,
        controller: &mut SearchController,
        loader: &mut CatalogLoader,
        tickets: &mut TicketIssuer,
    ) -> WorkerMessage {
        let target = controller.view_target();
        let request = controller
            .rerun(tickets)
            .unwrap_or_else(|| loader.load_recent(tickets));
        tracing::debug!(?target, ticket = %request.ticket(), "reconciling view");
        self.show_loading(target);
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SysrefError;
    use crate::search::debounce::ManualClock;
    use std::sync::Arc;
    use std::time::Duration;

    fn parts() -> (SearchController, CatalogLoader, TicketIssuer) {
        let controller = SearchController::new(Arc::new(ManualClock::new()), Duration::from_millis(300), 20);
        (controller, CatalogLoader::new(3), TicketIssuer::new())
    }

    #[test]
    fn inactive_reconcile_reloads_recent() {
        let (mut controller, mut loader, mut tickets) = parts();
        let mut view = ViewReconciler::new();
        let request = view.reconcile(&mut controller, &mut loader, &mut tickets);
        assert!(matches!(request, WorkerMessage::Recent { limit: 3, .. }));
        assert_eq!(view.content(), &ViewContent::Loading(ViewTarget::RecentEntries));
    }

    #[test]
    fn active_reconcile_reruns_search() {
        let (mut controller, mut loader, mut tickets) = parts();
        controller.on_input_changed("cron");
        controller.on_submit(&mut tickets);

        let mut view = ViewReconciler::new();
        let request = view.reconcile(&mut controller, &mut loader, &mut tickets);
        let WorkerMessage::Search { query, ticket } = request else {
            panic!("expected a search");
        };
        assert_eq!(query.text, "cron");
        assert!(controller.accepts(ticket));
    }

    #[test]
    fn clearing_uses_cached_recent_entries() {
        let (_controller, mut loader, mut tickets) = parts();
        let ticket = loader.load_recent(&mut tickets).ticket();
        loader.accept(ticket, Ok(vec![]));

        let mut view = ViewReconciler::new();
        assert!(view.show_recent(&mut loader, &mut tickets).is_none());
        assert_eq!(
            view.content(),
            &ViewContent::Entries {
                target: ViewTarget::RecentEntries,
                entries: vec![]
            }
        );
    }

    #[test]
    fn failures_render_a_placeholder() {
        let mut view = ViewReconciler::new();
        let before = view.revision();
        view.publish_search(Err(SysrefError::Network("refused".to_string())));
        assert_eq!(
            view.content(),
            &ViewContent::Failed {
                target: ViewTarget::SearchResults,
                message: SEARCH_FAILED.to_string()
            }
        );
        assert_eq!(view.revision(), before + 1);
    }
}
