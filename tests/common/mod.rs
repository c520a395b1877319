//! Shared harness for driving the client through `handle_event` with a manual
//! clock and scripted worker responses.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use sysref::app::{handle_event, Action, AppState, Event};
use sysref::domain::{Entry, EntryId, Result, SysrefError};
use sysref::search::{Clipboard, ManualClock, Notification, Prompt, SearchSession, SessionSettings};
use sysref::worker::{Ticket, WorkerMessage, WorkerResponse};
use sysref::Theme;

pub struct ScriptedPrompt {
    pub answer: Rc<RefCell<bool>>,
    pub asked: Rc<RefCell<Vec<String>>>,
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, question: &str) -> bool {
        self.asked.borrow_mut().push(question.to_string());
        *self.answer.borrow()
    }
}

pub struct RecordingClipboard {
    pub copied: Rc<RefCell<Vec<String>>>,
}

impl Clipboard for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub clock: ManualClock,
    pub state: AppState,
    pub answer: Rc<RefCell<bool>>,
    pub asked: Rc<RefCell<Vec<String>>>,
    pub copied: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        let session = SearchSession::new(Arc::new(clock.clone()), SessionSettings::default());
        let answer = Rc::new(RefCell::new(true));
        let asked = Rc::new(RefCell::new(Vec::new()));
        let copied = Rc::new(RefCell::new(Vec::new()));
        let state = AppState::new(
            session,
            Theme::default(),
            "http://localhost:8000",
            Box::new(ScriptedPrompt {
                answer: answer.clone(),
                asked: asked.clone(),
            }),
            Box::new(RecordingClipboard { copied: copied.clone() }),
        );
        Self {
            clock,
            state,
            answer,
            asked,
            copied,
        }
    }

    /// Starts the session and answers its categories and recent loads.
    pub fn started(categories: &[&str], recent: Vec<Entry>) -> Self {
        let mut harness = Self::new();
        let actions = harness.send(Event::Started);
        for request in requests(&actions) {
            match request {
                WorkerMessage::Categories { ticket } => harness.send(Event::WorkerResponse(
                    WorkerResponse::CategoriesLoaded {
                        ticket,
                        result: Ok(categories.iter().map(ToString::to_string).collect()),
                    },
                )),
                WorkerMessage::Recent { ticket, .. } => harness.respond_recent(ticket, Ok(recent.clone())),
                other => panic!("unexpected startup request {other:?}"),
            };
        }
        harness
    }

    pub fn send(&mut self, event: Event) -> Vec<Action> {
        handle_event(&mut self.state, event).expect("event handled").1
    }

    pub fn type_text(&mut self, text: &str) -> Vec<Action> {
        text.chars().flat_map(|c| self.send(Event::Char(c))).collect()
    }

    pub fn advance(&mut self, ms: u64) -> Vec<Action> {
        self.clock.advance(Duration::from_millis(ms));
        self.send(Event::Tick)
    }

    pub fn respond_search(&mut self, ticket: Ticket, result: Result<Vec<Entry>>) -> Vec<Action> {
        self.send(Event::WorkerResponse(WorkerResponse::SearchCompleted { ticket, result }))
    }

    pub fn respond_recent(&mut self, ticket: Ticket, result: Result<Vec<Entry>>) -> Vec<Action> {
        self.send(Event::WorkerResponse(WorkerResponse::RecentLoaded { ticket, result }))
    }

    pub fn respond_delete(&mut self, ticket: Ticket, id: EntryId, result: Result<()>) -> Vec<Action> {
        self.send(Event::WorkerResponse(WorkerResponse::EntryDeleted { ticket, id, result }))
    }

    pub fn respond_fetch(&mut self, ticket: Ticket, id: EntryId, result: Result<Entry>) -> Vec<Action> {
        self.send(Event::WorkerResponse(WorkerResponse::EntryFetched { ticket, id, result }))
    }

    pub fn titles(&self) -> Vec<String> {
        self.state.entries().iter().map(|e| e.title.clone()).collect()
    }
}

pub fn entry(id: i64, title: &str) -> Entry {
    Entry {
        id: EntryId(id),
        title: title.to_string(),
        category: "Linux".to_string(),
        tags: vec!["shell".to_string()],
        content: format!("content of {title}"),
        updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid date"),
        created_at: None,
        snippet: None,
    }
}

pub fn requests(actions: &[Action]) -> Vec<WorkerMessage> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::PostToWorker(message) => Some(message.clone()),
            _ => None,
        })
        .collect()
}

pub fn notifications(actions: &[Action]) -> Vec<Notification> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Notify(n) => Some(n.clone()),
            _ => None,
        })
        .collect()
}

/// The single search request in `actions`, as (ticket, text, category).
pub fn only_search(actions: &[Action]) -> (Ticket, String, Option<String>) {
    let searches: Vec<_> = requests(actions)
        .into_iter()
        .filter_map(|m| match m {
            WorkerMessage::Search { ticket, query } => Some((ticket, query.text, query.category)),
            _ => None,
        })
        .collect();
    assert_eq!(searches.len(), 1, "expected exactly one search in {actions:?}");
    searches.into_iter().next().expect("one search")
}

pub fn network_error() -> SysrefError {
    SysrefError::Network("connection refused".to_string())
}
