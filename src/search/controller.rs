//! Search controller.
//!
//! [`SearchController`] owns the [`SearchState`] and decides when a search
//! request goes out. Keystrokes go through the debouncer; filter changes and
//! explicit submits run immediately. An empty query never searches: it clears.
//!
//! The controller is sans-IO. Every operation returns a [`SearchStep`] telling
//! the caller what happened, and any request it wants sent is handed back as a
//! ready-to-post [`WorkerMessage`].

use super::debounce::{Clock, Debouncer};
use crate::api::SearchQuery;
use crate::worker::{Ticket, TicketIssuer, WorkerMessage};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before a search fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Result limit sent with every search request.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Which list the user is looking at.
///
/// Always derived from [`SearchState::is_active`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewTarget {
    RecentEntries,
    SearchResults,
}

/// Current search input and whether a search view is committed.
///
/// `active` is true iff the last committed action was a non-empty search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query_text: String,
    category: String,
    active: bool,
}

impl SearchState {
    /// The search box contents, untrimmed.
    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Selected category, empty for all categories.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn view_target(&self) -> ViewTarget {
        if self.active {
            ViewTarget::SearchResults
        } else {
            ViewTarget::RecentEntries
        }
    }
}

/// What a controller operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStep {
    /// A search is armed on the debounce timer.
    Deferred,
    /// A search request is ready to post.
    Issued(WorkerMessage),
    /// The search was cleared; recent entries are authoritative again.
    Cleared,
}

/// Debounce payload. The search reads the state at fire time, so it carries
/// nothing.
#[derive(Debug)]
struct DueSearch;

/// Owner of [`SearchState`] and issuer of search requests.
#[derive(Debug)]
pub struct SearchController {
    state: SearchState,
    /// Trimmed query of the last issued search.
    committed: String,
    debouncer: Debouncer<DueSearch>,
    delay: Duration,
    limit: usize,
    latest: Option<Ticket>,
}

impl SearchController {
    /// Creates a controller with an empty, inactive state.
    ///
    /// # Parameters
    ///
    /// * `clock` - Time source for the debounce timer
    /// * `delay` - Debounce quiet period
    /// * `limit` - Result limit sent with each search
    pub fn new(clock: Arc<dyn Clock>, delay: Duration, limit: usize) -> Self {
        Self {
            state: SearchState::default(),
            committed: String::new(),
            debouncer: Debouncer::new(clock),
            delay,
            limit,
            latest: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Trimmed query of the most recently issued search, empty when inactive.
    #[must_use]
    pub fn committed_query(&self) -> &str {
        &self.committed
    }

    #[must_use]
    pub const fn view_target(&self) -> ViewTarget {
        self.state.view_target()
    }

    /// Instant at which a debounced search will fire, if one is armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    /// Time left until a debounced search fires, if one is armed.
    #[must_use]
    pub fn time_until_due(&self) -> Option<Duration> {
        self.debouncer.time_until_due()
    }

    /// Records new search box contents.
    ///
    /// Non-empty input (after trimming) arms the debounce timer. Empty input
    /// clears immediately, so no stale results linger.
    pub fn on_input_changed(&mut self, raw: &str) -> SearchStep {
        raw.clone_into(&mut self.state.query_text);
        if raw.trim().is_empty() {
            return self.clear();
        }
        self.debouncer.schedule(self.delay, DueSearch);
        SearchStep::Deferred
    }

    /// Sets the category filter and searches right away.
    pub fn on_filter_changed(&mut self, category: &str, tickets: &mut TicketIssuer) -> SearchStep {
        category.clone_into(&mut self.state.category);
        self.execute_search(tickets)
    }

    /// Searches right away with the current input.
    pub fn on_submit(&mut self, tickets: &mut TicketIssuer) -> SearchStep {
        self.execute_search(tickets)
    }

    /// Fires the debounced search if its quiet period has elapsed.
    pub fn poll(&mut self, tickets: &mut TicketIssuer) -> Option<SearchStep> {
        self.debouncer
            .take_due()
            .map(|DueSearch| self.execute_search(tickets))
    }

    /// Issues a search for the current trimmed input and category.
    ///
    /// An empty query behaves as [`clear`](Self::clear). Any armed debounce
    /// timer is dropped, since this search supersedes it.
    pub fn execute_search(&mut self, tickets: &mut TicketIssuer) -> SearchStep {
        self.debouncer.cancel_all();

        let query = self.state.query_text.trim();
        if query.is_empty() {
            return self.clear();
        }

        self.committed = query.to_string();
        self.state.active = true;
        SearchStep::Issued(self.issue(tickets))
    }

    /// Re-issues the committed search, if a search is active.
    ///
    /// Used after mutations, where the input box may have moved on but the
    /// displayed results still belong to the committed query.
    pub fn rerun(&mut self, tickets: &mut TicketIssuer) -> Option<WorkerMessage> {
        if !self.state.active {
            return None;
        }
        Some(self.issue(tickets))
    }

    /// Resets to an empty, inactive state and disarms the timer.
    pub fn clear(&mut self) -> SearchStep {
        self.state = SearchState::default();
        self.committed.clear();
        self.debouncer.cancel_all();
        self.latest = None;
        tracing::debug!("search cleared");
        SearchStep::Cleared
    }

    /// Whether a search response with `ticket` should be rendered.
    ///
    /// Only the most recently issued search counts, and only while a search is
    /// still active.
    #[must_use]
    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.state.active && self.latest == Some(ticket)
    }

    fn issue(&mut self, tickets: &mut TicketIssuer) -> WorkerMessage {
        let category = (!self.state.category.is_empty()).then(|| self.state.category.clone());
        let message = WorkerMessage::search(
            tickets,
            SearchQuery {
                text: self.committed.clone(),
                category,
                limit: self.limit,
            },
        );
        self.latest = Some(message.ticket());
        tracing::debug!(query = %self.committed, ticket = %message.ticket(), "search issued");
        message
    }
}
