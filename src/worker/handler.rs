//! Catalog worker pool.
//!
//! Catalog requests block on the network, so they run on a small pool of
//! background threads instead of the event thread. Workers share one request
//! queue; whichever is idle picks up the next message. Responses go back over a
//! single channel that the event loop drains between input events.

use crate::api::Catalog;
use crate::domain::error::{Result, SysrefError};
use crate::worker::{WorkerMessage, WorkerResponse};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Executes catalog requests against a [`Catalog`] backend.
///
/// Stateless apart from the shared backend, so every pool thread holds its own
/// clone.
#[derive(Clone)]
pub struct CatalogWorker {
    catalog: Arc<dyn Catalog>,
}

impl CatalogWorker {
    /// Creates a worker over the given backend.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Logs the outcome of a backend call with consistent fields.
    fn log_outcome<T>(operation: &str, result: &Result<T>) {
        match result {
            Ok(_) => tracing::debug!(operation, "catalog operation successful"),
            Err(e) => tracing::debug!(operation, error = %e, "catalog operation failed"),
        }
    }

    /// Processes a worker message and returns the matching response.
    ///
    /// This is the main message handling entry point, dispatching to the
    /// backend method for the message variant inside a tracing span. Backend
    /// failures are returned in the response, never raised.
    pub fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", ticket = %message.ticket());
        let _guard = span.entered();

        match message {
            WorkerMessage::Search { ticket, query } => {
                let result = self.catalog.search(&query);
                Self::log_outcome("search", &result);
                if let Ok(entries) = &result {
                    tracing::debug!(query = %query.text, hits = entries.len(), "search answered");
                }
                WorkerResponse::SearchCompleted { ticket, result }
            }

            WorkerMessage::Recent { ticket, limit } => {
                let result = self.catalog.recent(limit);
                Self::log_outcome("recent", &result);
                WorkerResponse::RecentLoaded { ticket, result }
            }

            WorkerMessage::Categories { ticket } => {
                let result = self.catalog.categories();
                Self::log_outcome("categories", &result);
                WorkerResponse::CategoriesLoaded { ticket, result }
            }

            WorkerMessage::Fetch { ticket, id } => {
                let result = self.catalog.fetch(id);
                Self::log_outcome("fetch", &result);
                WorkerResponse::EntryFetched { ticket, id, result }
            }

            WorkerMessage::Delete { ticket, id } => {
                let result = self.catalog.delete(id);
                Self::log_outcome("delete", &result);
                WorkerResponse::EntryDeleted { ticket, id, result }
            }
        }
    }
}

/// A fixed-size pool of [`CatalogWorker`] threads.
///
/// Dropping the pool closes the request queue; threads exit once they finish
/// the message they are working on.
pub struct WorkerPool {
    requests: Option<Sender<WorkerMessage>>,
    responses: Receiver<WorkerResponse>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `size` worker threads over `catalog`.
    ///
    /// A `size` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns [`SysrefError::Io`] if the OS refuses to spawn a thread.
    pub fn spawn(catalog: Arc<dyn Catalog>, size: usize) -> Result<Self> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<WorkerMessage>();
        let (response_tx, response_rx) = crossbeam_channel::unbounded::<WorkerResponse>();
        let worker = CatalogWorker::new(catalog);

        let size = size.max(1);
        let mut handles = Vec::with_capacity(size);
        for index in 0..size {
            let worker = worker.clone();
            let requests = request_rx.clone();
            let responses = response_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("sysref-worker-{index}"))
                .spawn(move || {
                    while let Ok(message) = requests.recv() {
                        if responses.send(worker.handle_message(message)).is_err() {
                            break;
                        }
                    }
                    tracing::debug!(worker = index, "catalog worker exiting");
                })?;
            handles.push(handle);
        }

        tracing::debug!(workers = size, "catalog worker pool started");

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            handles,
        })
    }

    /// Queues a request for the next idle worker.
    ///
    /// # Errors
    ///
    /// Returns [`SysrefError::Worker`] if every worker thread has exited.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        let sender = self
            .requests
            .as_ref()
            .ok_or_else(|| SysrefError::Worker("worker pool is shut down".to_string()))?;
        sender
            .send(message)
            .map_err(|_| SysrefError::Worker("all catalog workers have exited".to_string()))
    }

    /// Returns a finished response if one is waiting.
    #[must_use]
    pub fn try_recv(&self) -> Option<WorkerResponse> {
        match self.responses.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Returns the response channel, for callers that want to block on it.
    #[must_use]
    pub const fn responses(&self) -> &Receiver<WorkerResponse> {
        &self.responses
    }

    /// Closes the request queue and waits for every worker to exit.
    pub fn shutdown(mut self) {
        self.requests.take();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                tracing::debug!("catalog worker panicked");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.requests.take();
    }
}
