//! Worker pool against an in-memory catalog, and the full client loop on top
//! of it.

mod common;

use common::{entry, requests, Harness};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sysref::api::{Catalog, SearchQuery};
use sysref::app::{Action, EntryAction, Event};
use sysref::domain::{Entry, EntryId, Result, SysrefError};
use sysref::worker::{TicketIssuer, WorkerMessage, WorkerPool, WorkerResponse};

const WAIT: Duration = Duration::from_secs(5);

/// Entries kept newest first.
struct MemoryCatalog {
    entries: Mutex<Vec<Entry>>,
}

impl MemoryCatalog {
    fn new(entries: Vec<Entry>) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(entries),
        })
    }

    fn snapshot(&self) -> Vec<Entry> {
        self.entries.lock().expect("catalog lock").clone()
    }
}

impl Catalog for MemoryCatalog {
    fn search(&self, query: &SearchQuery) -> Result<Vec<Entry>> {
        let needle = query.text.to_lowercase();
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|e| query.category.as_ref().map_or(true, |c| &e.category == c))
            .filter(|e| e.title.to_lowercase().contains(&needle) || e.content.to_lowercase().contains(&needle))
            .take(query.limit)
            .collect())
    }

    fn recent(&self, limit: usize) -> Result<Vec<Entry>> {
        Ok(self.snapshot().into_iter().take(limit).collect())
    }

    fn categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = self.snapshot().into_iter().map(|e| e.category).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    fn fetch(&self, id: EntryId) -> Result<Entry> {
        self.snapshot()
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(SysrefError::NotFound(id.0))
    }

    fn delete(&self, id: EntryId) -> Result<()> {
        self.entries.lock().expect("catalog lock").retain(|e| e.id != id);
        Ok(())
    }
}

fn catalog() -> Arc<MemoryCatalog> {
    MemoryCatalog::new(vec![
        entry(5, "postgres vacuum"),
        entry(4, "nginx reload"),
        entry(3, "postgres backup"),
        entry(2, "ssh tunnel"),
        entry(1, "tar extract"),
    ])
}

#[test]
fn every_request_gets_a_response_with_its_ticket() {
    let pool = WorkerPool::spawn(catalog(), 3).expect("pool");
    let mut tickets = TicketIssuer::new();
    let messages = vec![
        WorkerMessage::recent(&mut tickets, 2),
        WorkerMessage::categories(&mut tickets),
        WorkerMessage::search(
            &mut tickets,
            SearchQuery {
                text: "postgres".to_string(),
                category: None,
                limit: 20,
            },
        ),
        WorkerMessage::fetch(&mut tickets, EntryId(99)),
        WorkerMessage::delete(&mut tickets, EntryId(1)),
    ];
    let expected: Vec<_> = messages.iter().map(WorkerMessage::ticket).collect();
    for message in messages {
        pool.post(message).expect("post");
    }

    let mut responses = HashMap::new();
    for _ in 0..expected.len() {
        let response = pool.responses().recv_timeout(WAIT).expect("response");
        responses.insert(response.ticket(), response);
    }

    assert!(matches!(
        &responses[&expected[0]],
        WorkerResponse::RecentLoaded { result: Ok(entries), .. } if entries.len() == 2
    ));
    assert!(matches!(
        &responses[&expected[1]],
        WorkerResponse::CategoriesLoaded { result: Ok(categories), .. } if categories == &["Linux"]
    ));
    assert!(matches!(
        &responses[&expected[2]],
        WorkerResponse::SearchCompleted { result: Ok(entries), .. } if entries.len() == 2
    ));
    assert!(matches!(
        &responses[&expected[3]],
        WorkerResponse::EntryFetched { result: Err(SysrefError::NotFound(99)), .. }
    ));
    assert!(matches!(
        &responses[&expected[4]],
        WorkerResponse::EntryDeleted { id: EntryId(1), result: Ok(()), .. }
    ));

    pool.shutdown();
}

#[test]
fn shutdown_closes_the_response_channel() {
    let pool = WorkerPool::spawn(catalog(), 1).expect("pool");
    let responses = pool.responses().clone();
    pool.shutdown();
    assert!(responses.try_recv().is_err());
}

/// Posts every request in `actions` and feeds responses back until nothing is
/// outstanding. Returns the notifications shown on the way.
fn settle(h: &mut Harness, pool: &WorkerPool, actions: Vec<Action>) -> Vec<String> {
    let mut outstanding = 0;
    let mut shown = Vec::new();
    let mut queue = actions;
    loop {
        for action in queue.drain(..) {
            match action {
                Action::PostToWorker(message) => {
                    pool.post(message).expect("post");
                    outstanding += 1;
                }
                Action::Notify(n) => shown.push(n.message),
                _ => {}
            }
        }
        if outstanding == 0 {
            return shown;
        }
        let response = pool.responses().recv_timeout(WAIT).expect("response");
        outstanding -= 1;
        queue = h.send(Event::WorkerResponse(response));
    }
}

#[test]
fn client_loop_over_the_pool() {
    let catalog = catalog();
    let pool = WorkerPool::spawn(catalog.clone(), 2).expect("pool");
    let mut h = Harness::new();

    let actions = h.send(Event::Started);
    assert_eq!(requests(&actions).len(), 2);
    settle(&mut h, &pool, actions);
    assert_eq!(h.titles(), vec!["postgres vacuum", "nginx reload", "postgres backup"]);
    assert_eq!(h.state.session.categories(), ["Linux"]);

    h.type_text("postgres");
    let actions = h.send(Event::Submit);
    settle(&mut h, &pool, actions);
    assert_eq!(h.titles(), vec!["postgres vacuum", "postgres backup"]);

    let actions = h.send(Event::EntryAction {
        id: EntryId(5),
        action: EntryAction::Delete,
    });
    let shown = settle(&mut h, &pool, actions);
    assert_eq!(shown, vec!["Entry deleted successfully"]);
    assert_eq!(h.titles(), vec!["postgres backup"]);
    assert_eq!(catalog.snapshot().len(), 4);

    let actions = h.send(Event::EntryAction {
        id: EntryId(3),
        action: EntryAction::Copy,
    });
    let shown = settle(&mut h, &pool, actions);
    assert_eq!(shown, vec!["Content copied to clipboard"]);
    assert_eq!(h.copied.borrow().as_slice(), ["content of postgres backup"]);

    pool.shutdown();
}
