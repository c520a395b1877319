//! Interactive terminal runtime.
//!
//! Owns everything the pure layers leave out: raw mode and the alternate
//! screen, the catalog worker pool, the clock loop, key mapping, and the
//! prompt and clipboard capabilities.
//!
//! # Event Loop
//!
//! ```text
//! ┌──────────────┐  keys   ┌──────────────┐ actions ┌──────────────┐
//! │  crossterm   │────────▶│ handle_event │────────▶│   execute    │
//! └──────────────┘         └──────────────┘         └──────────────┘
//!        ▲                        ▲                        │
//!        │ poll timeout           │ responses              │ post
//!        │                 ┌──────────────┐                │
//!        └─────────────────│  WorkerPool  │◀───────────────┘
//!                          └──────────────┘
//! ```
//!
//! The poll timeout is the shortest of a short tick, the pending debounce
//! deadline, and the next overlay expiry, so debounced searches fire on time
//! without busy-waiting.

use crate::api::HttpCatalog;
use crate::app::{handle_event, Action, AppState, EntryAction, Event, Focus};
use crate::domain::error::{Result, SysrefError};
use crate::search::{Clipboard, Prompt};
use crate::ui::Overlays;
use crate::worker::WorkerPool;
use crate::Config;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, style, terminal};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest the loop sleeps without checking the worker pool.
const TICK: Duration = Duration::from_millis(25);

/// Yes/no prompt drawn on the last terminal row.
///
/// Blocks on the keyboard until `y` (confirm) or any other key (cancel).
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> bool {
        let (_, rows) = terminal::size().unwrap_or((80, 24));
        let mut stdout = io::stdout();
        let drawn = execute!(
            stdout,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(format!("{question} [y/N] ")),
        );
        if let Err(e) = drawn {
            tracing::warn!(error = %e, "could not draw confirmation prompt");
            return false;
        }

        loop {
            match event::read() {
                Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    return matches!(key.code, KeyCode::Char('y' | 'Y'));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "confirmation prompt read failed");
                    return false;
                }
            }
        }
    }
}

/// Confirms on stdin with a `[y/N]` line, for the non-interactive commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinePrompt;

impl Prompt for LinePrompt {
    fn confirm(&mut self, question: &str) -> bool {
        print!("{question} [y/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        io::stdin().read_line(&mut answer).is_ok() && matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

/// System clipboard using arboard.
///
/// The platform clipboard is opened on first use, so a headless session only
/// fails when something is actually copied.
///
/// On Linux the copied text is only served while its owner is alive. The
/// interactive runtime keeps one open for the whole session; a short-lived
/// process uses [`SystemClipboard::holding`], which blocks in `write_text`
/// until another program takes the selection over.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
    hold: bool,
}

impl SystemClipboard {
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: None, hold: false }
    }

    /// A clipboard that keeps serving what it wrote until it is replaced.
    #[must_use]
    pub const fn holding() -> Self {
        Self { inner: None, hold: true }
    }

    /// Whether writes block until the selection is taken over.
    #[must_use]
    pub const fn holds_selection(&self) -> bool {
        self.hold && cfg!(target_os = "linux")
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| SysrefError::Permission(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| SysrefError::Permission("clipboard unavailable".to_string()))
    }
}

impl Clipboard for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn write_text(&mut self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;

        let hold = self.hold;
        let clipboard = self.ensure()?;
        let written = if hold {
            clipboard.set().wait().text(text.to_string())
        } else {
            clipboard.set_text(text.to_string())
        };
        written.map_err(|e| SysrefError::Permission(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn write_text(&mut self, text: &str) -> Result<()> {
        let clipboard = self.ensure()?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| SysrefError::Permission(e.to_string()))
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .field("hold", &self.hold)
            .finish()
    }
}

/// Maps a key press to an application event.
///
/// Keys mean different things depending on [`Focus`]: while typing,
/// printable keys edit the query; while navigating, they act on the selected
/// entry. Returns `None` for keys with no binding, key releases, and entry
/// keys with nothing selected.
#[must_use]
pub fn map_key(state: &AppState, key: KeyEvent) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Event::Quit),
            KeyCode::Char('k') => Some(Event::FocusSearch),
            KeyCode::Char('u') => Some(Event::ClearInput),
            KeyCode::Char('n') => Some(Event::SelectNext),
            KeyCode::Char('p') => Some(Event::SelectPrevious),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => return Some(Event::ClearSearch),
        KeyCode::Tab => return Some(Event::NextCategory),
        KeyCode::BackTab => return Some(Event::PreviousCategory),
        KeyCode::Down => return Some(Event::SelectNext),
        KeyCode::Up => return Some(Event::SelectPrevious),
        _ => {}
    }

    let entry_action = |action| state.selected_entry().map(|entry| Event::EntryAction { id: entry.id, action });

    match state.focus {
        Focus::Typing => match key.code {
            KeyCode::Enter => Some(Event::Submit),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Char(c) => Some(Event::Char(c)),
            _ => None,
        },
        Focus::Navigating => match key.code {
            KeyCode::Enter => entry_action(EntryAction::View).or(Some(Event::Submit)),
            KeyCode::Char('j') => Some(Event::SelectNext),
            KeyCode::Char('k') => Some(Event::SelectPrevious),
            KeyCode::Char('v') => entry_action(EntryAction::View),
            KeyCode::Char('e') => entry_action(EntryAction::Edit),
            KeyCode::Char('d') => entry_action(EntryAction::Delete),
            KeyCode::Char('c' | 'y') => entry_action(EntryAction::Copy),
            KeyCode::Char('/') | KeyCode::Backspace => Some(Event::FocusSearch),
            KeyCode::Char('?') => Some(Event::ShowShortcuts),
            KeyCode::Char('q') => Some(Event::Quit),
            _ => None,
        },
    }
}

/// Raw mode and alternate screen, restored on drop.
struct ScreenGuard;

impl ScreenGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().map_err(|e| SysrefError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .map_err(|e| SysrefError::Terminal(format!("Failed to enter alternate screen: {e}")))?;
        Ok(Self)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// The running interactive client.
struct Runtime {
    state: AppState,
    overlays: Overlays,
    pool: WorkerPool,
    dirty: bool,
    quit: bool,
}

impl Runtime {
    fn dispatch(&mut self, event: Event) -> Result<()> {
        let (should_render, actions) = handle_event(&mut self.state, event)?;
        self.dirty |= should_render;
        for action in actions {
            self.execute_action(action)?;
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::PostToWorker(message) => self.pool.post(message)?,
            Action::Notify(notification) => {
                self.overlays.notify(notification, Instant::now());
                self.dirty = true;
            }
            Action::OpenUrl(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!(url = %url, error = %e, "failed to open browser");
                    self.overlays
                        .notify(crate::search::Notification::error(format!("Could not open {url}")), Instant::now());
                    self.dirty = true;
                }
            }
            Action::ShowShortcuts => {
                self.overlays.show_shortcuts(Instant::now());
                self.dirty = true;
            }
            Action::Quit => self.quit = true,
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let (cols, rows) = terminal::size().map_err(|e| SysrefError::Terminal(e.to_string()))?;
        let frame = crate::ui::render(&self.state, &self.overlays, usize::from(rows), usize::from(cols));
        let mut stdout = io::stdout().lock();
        stdout.write_all(frame.as_bytes())?;
        queue!(stdout, cursor::Hide).map_err(|e| SysrefError::Terminal(e.to_string()))?;
        stdout.flush()?;
        self.dirty = false;
        Ok(())
    }

    fn poll_timeout(&self) -> Duration {
        let now = Instant::now();
        let mut timeout = TICK;
        if let Some(due) = self.state.session.time_until_due() {
            timeout = timeout.min(due);
        }
        if let Some(expiry) = self.overlays.next_expiry() {
            timeout = timeout.min(expiry.saturating_duration_since(now));
        }
        timeout
    }

    fn run(&mut self) -> Result<()> {
        self.dispatch(Event::Started)?;

        while !self.quit {
            if self.dirty {
                self.draw()?;
            }

            if event::poll(self.poll_timeout()).map_err(|e| SysrefError::Terminal(e.to_string()))? {
                match event::read().map_err(|e| SysrefError::Terminal(e.to_string()))? {
                    TermEvent::Key(key) => {
                        if let Some(event) = map_key(&self.state, key) {
                            self.dispatch(event)?;
                        }
                    }
                    TermEvent::Resize(..) => self.dirty = true,
                    _ => {}
                }
            }

            while let Some(response) = self.pool.try_recv() {
                self.dispatch(Event::WorkerResponse(response))?;
            }

            self.dispatch(Event::Tick)?;
            self.dirty |= self.overlays.prune(Instant::now());
        }

        Ok(())
    }
}

/// Runs the interactive client until the user quits.
///
/// # Errors
///
/// Returns [`SysrefError::Config`] if the HTTP client cannot be built,
/// [`SysrefError::Terminal`] if the terminal cannot be set up or read, and
/// [`SysrefError::Worker`] if the worker pool dies.
pub fn run(config: &Config) -> Result<()> {
    let catalog = HttpCatalog::new(&config.base_url, config.request_timeout())?;
    let pool = WorkerPool::spawn(Arc::new(catalog), config.workers)?;
    let state = crate::initialize(config, Box::new(TerminalPrompt), Box::new(SystemClipboard::new()));

    let _screen = ScreenGuard::enter()?;
    let mut runtime = Runtime {
        state,
        overlays: Overlays::new(config.notification_ttl()),
        pool,
        dirty: true,
        quit: false,
    };

    tracing::info!(base_url = %config.base_url, "interactive session started");
    let outcome = runtime.run();
    tracing::info!(ok = outcome.is_ok(), "interactive session ended");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entry, EntryId};
    use crate::search::{ManualClock, SearchSession, SessionSettings};
    use crate::worker::{WorkerMessage, WorkerResponse};
    use crate::Theme;

    #[test]
    fn only_the_holding_clipboard_waits_for_takeover() {
        assert!(!SystemClipboard::new().holds_selection());
        assert_eq!(SystemClipboard::holding().holds_selection(), cfg!(target_os = "linux"));
    }

    struct Deny;
    impl Prompt for Deny {
        fn confirm(&mut self, _question: &str) -> bool {
            false
        }
    }

    struct Sink;
    impl Clipboard for Sink {
        fn write_text(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with_entry() -> AppState {
        let session = SearchSession::new(Arc::new(ManualClock::new()), SessionSettings::default());
        let mut state = AppState::new(session, Theme::default(), "http://localhost:8000", Box::new(Deny), Box::new(Sink));
        let (_, actions) = handle_event(&mut state, Event::Started).expect("start");
        let ticket = actions
            .iter()
            .find_map(|a| match a {
                Action::PostToWorker(m @ WorkerMessage::Recent { .. }) => Some(m.ticket()),
                _ => None,
            })
            .expect("recent request");
        let entry = Entry {
            id: EntryId(42),
            title: "tmux cheatsheet".to_string(),
            category: "Tools".to_string(),
            tags: vec![],
            content: "prefix c".to_string(),
            updated_at: chrono::Utc::now(),
            created_at: None,
            snippet: None,
        };
        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::RecentLoaded {
                ticket,
                result: Ok(vec![entry]),
            }),
        )
        .expect("response");
        state
    }

    #[test]
    fn typing_keys_edit_the_query() {
        let state = state_with_entry();
        assert!(matches!(map_key(&state, key(KeyCode::Char('d'))), Some(Event::Char('d'))));
        assert!(matches!(map_key(&state, key(KeyCode::Enter)), Some(Event::Submit)));
        assert!(matches!(map_key(&state, key(KeyCode::Backspace)), Some(Event::Backspace)));
    }

    #[test]
    fn navigating_keys_act_on_the_selected_entry() {
        let mut state = state_with_entry();
        state.focus = Focus::Navigating;
        assert!(matches!(
            map_key(&state, key(KeyCode::Char('d'))),
            Some(Event::EntryAction {
                id: EntryId(42),
                action: EntryAction::Delete
            })
        ));
        assert!(matches!(
            map_key(&state, key(KeyCode::Char('y'))),
            Some(Event::EntryAction {
                action: EntryAction::Copy,
                ..
            })
        ));
        assert!(matches!(map_key(&state, key(KeyCode::Char('?'))), Some(Event::ShowShortcuts)));
        assert!(matches!(map_key(&state, key(KeyCode::Char('q'))), Some(Event::Quit)));
    }

    #[test]
    fn global_bindings_ignore_focus() {
        let state = state_with_entry();
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert!(matches!(map_key(&state, ctrl('c')), Some(Event::Quit)));
        assert!(matches!(map_key(&state, ctrl('k')), Some(Event::FocusSearch)));
        assert!(matches!(map_key(&state, key(KeyCode::Esc)), Some(Event::ClearSearch)));
        assert!(matches!(map_key(&state, key(KeyCode::BackTab)), Some(Event::PreviousCategory)));
    }

    #[test]
    fn entry_keys_need_a_selection() {
        let session = SearchSession::new(Arc::new(ManualClock::new()), SessionSettings::default());
        let mut state = AppState::new(session, Theme::default(), "http://localhost:8000", Box::new(Deny), Box::new(Sink));
        state.focus = Focus::Navigating;
        assert!(map_key(&state, key(KeyCode::Char('v'))).is_none());
        assert!(matches!(map_key(&state, key(KeyCode::Enter)), Some(Event::Submit)));
    }
}
