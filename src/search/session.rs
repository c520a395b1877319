//! Search session: the five search components wired together.
//!
//! [`SearchSession`] is what the event handler talks to. Each operation applies
//! its state change synchronously and returns the [`Effect`]s the runtime must
//! carry out: requests to post and notifications to show. Worker responses come
//! back through [`SearchSession::on_response`], where stale tickets are dropped.

use super::controller::{SearchController, SearchState, SearchStep, ViewTarget};
use super::debounce::Clock;
use super::gateway::{Clipboard, EntryActionGateway, Notification, Prompt};
use super::loader::CatalogLoader;
use super::reconciler::{ViewContent, ViewReconciler};
use crate::domain::EntryId;
use crate::worker::{Ticket, TicketIssuer, WorkerMessage, WorkerResponse};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A side effect requested by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post this request to the catalog worker.
    Request(WorkerMessage),
    /// Show this notification.
    Notify(Notification),
}

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub debounce: Duration,
    pub search_limit: usize,
    pub recent_limit: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            debounce: super::controller::DEFAULT_DEBOUNCE,
            search_limit: super::controller::DEFAULT_SEARCH_LIMIT,
            recent_limit: super::loader::DEFAULT_RECENT_LIMIT,
        }
    }
}

/// The search-and-view state machine.
#[derive(Debug)]
pub struct SearchSession {
    tickets: TicketIssuer,
    controller: SearchController,
    loader: CatalogLoader,
    view: ViewReconciler,
    gateway: EntryActionGateway,
    categories: Vec<String>,
    categories_ticket: Option<Ticket>,
}

impl SearchSession {
    pub fn new(clock: Arc<dyn Clock>, settings: SessionSettings) -> Self {
        Self {
            tickets: TicketIssuer::new(),
            controller: SearchController::new(clock, settings.debounce, settings.search_limit),
            loader: CatalogLoader::new(settings.recent_limit),
            view: ViewReconciler::new(),
            gateway: EntryActionGateway::new(),
            categories: Vec::new(),
            categories_ticket: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SearchState {
        self.controller.state()
    }

    /// Query of the search the results belong to.
    #[must_use]
    pub fn committed_query(&self) -> &str {
        self.controller.committed_query()
    }

    #[must_use]
    pub const fn view(&self) -> &ViewContent {
        self.view.content()
    }

    /// Render counter of the results area.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.view.revision()
    }

    /// Known categories, in server order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.next_deadline()
    }

    #[must_use]
    pub fn time_until_due(&self) -> Option<Duration> {
        self.controller.time_until_due()
    }

    /// Initial loads: categories for the filter, then recent entries.
    pub fn start(&mut self) -> Vec<Effect> {
        let categories = WorkerMessage::categories(&mut self.tickets);
        self.categories_ticket = Some(categories.ticket());
        self.view.show_loading(ViewTarget::RecentEntries);
        let recent = self.loader.load_recent(&mut self.tickets);
        vec![Effect::Request(categories), Effect::Request(recent)]
    }

    /// The search box changed.
    pub fn input_changed(&mut self, raw: &str) -> Vec<Effect> {
        let step = self.controller.on_input_changed(raw);
        self.apply(step)
    }

    /// The category filter changed.
    pub fn filter_changed(&mut self, category: &str) -> Vec<Effect> {
        let step = self.controller.on_filter_changed(category, &mut self.tickets);
        self.apply(step)
    }

    /// The user submitted the search box.
    pub fn submit(&mut self) -> Vec<Effect> {
        let step = self.controller.on_submit(&mut self.tickets);
        self.apply(step)
    }

    /// The user asked to clear the search.
    pub fn clear(&mut self) -> Vec<Effect> {
        let step = self.controller.clear();
        self.apply(step)
    }

    /// Clock tick: fires a debounced search whose quiet period is over.
    pub fn tick(&mut self) -> Vec<Effect> {
        match self.controller.poll(&mut self.tickets) {
            Some(step) => self.apply(step),
            None => Vec::new(),
        }
    }

    /// Re-renders the authoritative view from its source.
    pub fn reconcile(&mut self) -> Vec<Effect> {
        let request = self
            .view
            .reconcile(&mut self.controller, &mut self.loader, &mut self.tickets);
        vec![Effect::Request(request)]
    }

    /// Deletes an entry after confirmation.
    pub fn delete_entry(&mut self, id: EntryId, prompt: &mut dyn Prompt) -> Vec<Effect> {
        self.gateway
            .delete_entry(id, prompt, &mut self.tickets)
            .map(Effect::Request)
            .into_iter()
            .collect()
    }

    /// Copies an entry's full content to the clipboard.
    pub fn copy_entry(&mut self, id: EntryId) -> Vec<Effect> {
        vec![Effect::Request(self.gateway.copy_entry(id, &mut self.tickets))]
    }

    /// Folds a worker response into the session.
    pub fn on_response(&mut self, response: WorkerResponse, clipboard: &mut dyn Clipboard) -> Vec<Effect> {
        match response {
            WorkerResponse::SearchCompleted { ticket, result } => {
                if self.controller.accepts(ticket) {
                    self.view.publish_search(result);
                } else {
                    tracing::debug!(%ticket, "stale search response dropped");
                }
                Vec::new()
            }

            WorkerResponse::RecentLoaded { ticket, result } => {
                if let Some(result) = self.loader.accept(ticket, result) {
                    if self.controller.state().is_active() {
                        tracing::debug!(%ticket, "recent entries cached behind active search");
                    } else {
                        self.view.publish_recent(result);
                    }
                }
                Vec::new()
            }

            WorkerResponse::CategoriesLoaded { ticket, result } => {
                if self.categories_ticket == Some(ticket) {
                    self.categories_ticket = None;
                    match result {
                        Ok(categories) => {
                            tracing::debug!(count = categories.len(), "categories loaded");
                            self.categories = categories;
                        }
                        Err(e) => tracing::warn!(error = %e, "categories unavailable"),
                    }
                }
                Vec::new()
            }

            WorkerResponse::EntryDeleted { ticket, result, .. } => {
                let Some(outcome) = self.gateway.on_deleted(ticket, result) else {
                    return Vec::new();
                };
                let mut effects = if outcome.reconcile {
                    self.loader.invalidate();
                    self.reconcile()
                } else {
                    Vec::new()
                };
                effects.push(Effect::Notify(outcome.notification));
                effects
            }

            WorkerResponse::EntryFetched { ticket, result, .. } => self
                .gateway
                .on_fetched(ticket, result, clipboard)
                .map(Effect::Notify)
                .into_iter()
                .collect(),
        }
    }

    fn apply(&mut self, step: SearchStep) -> Vec<Effect> {
        match step {
            SearchStep::Deferred => Vec::new(),
            SearchStep::Issued(request) => {
                self.view.show_loading(ViewTarget::SearchResults);
                vec![Effect::Request(request)]
            }
            SearchStep::Cleared => self
                .view
                .show_recent(&mut self.loader, &mut self.tickets)
                .map(Effect::Request)
                .into_iter()
                .collect(),
        }
    }
}
