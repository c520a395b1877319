//! Transient overlays: notification toasts and the shortcut help box.
//!
//! Both disappear on their own after a fixed time. Times are passed in by the
//! caller so the runtime and the tests share one code path.

use crate::search::Notification;
use crate::ui::viewmodel::ToastInfo;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

/// How long the shortcut help stays visible.
pub const SHORTCUTS_TTL: Duration = Duration::from_millis(3000);

/// At most this many toasts are kept; older ones are dropped first.
const MAX_TOASTS: usize = 4;

/// Overlay state owned by the terminal runtime.
#[derive(Debug)]
pub struct Overlays {
    ttl: Duration,
    toasts: VecDeque<(Notification, Instant)>,
    shortcuts_until: Option<Instant>,
}

impl Overlays {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            toasts: VecDeque::new(),
            shortcuts_until: None,
        }
    }

    /// Shows a notification until `now + ttl`.
    pub fn notify(&mut self, notification: Notification, now: Instant) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back((notification, now + self.ttl));
    }

    /// Shows the shortcut help until `now + SHORTCUTS_TTL`.
    pub fn show_shortcuts(&mut self, now: Instant) {
        self.shortcuts_until = Some(now + SHORTCUTS_TTL);
    }

    /// Drops everything that has expired. Returns `true` if anything did.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|(_, until)| *until > now);
        let mut changed = self.toasts.len() != before;
        if self.shortcuts_until.is_some_and(|until| until <= now) {
            self.shortcuts_until = None;
            changed = true;
        }
        changed
    }

    /// Earliest instant at which something will expire.
    #[must_use]
    pub fn next_expiry(&self) -> Option<Instant> {
        self.toasts
            .iter()
            .map(|(_, until)| *until)
            .chain(self.shortcuts_until)
            .min()
    }

    /// Visible toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<ToastInfo> {
        self.toasts
            .iter()
            .map(|(n, _)| ToastInfo {
                message: n.message.clone(),
                kind: n.kind,
            })
            .collect()
    }

    #[must_use]
    pub const fn shortcuts_visible(&self) -> bool {
        self.shortcuts_until.is_some()
    }
}

impl Default for Overlays {
    fn default() -> Self {
        Self::new(NOTIFICATION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_their_ttl() {
        let start = Instant::now();
        let mut overlays = Overlays::default();
        overlays.notify(Notification::success("Entry deleted successfully"), start);

        assert!(!overlays.prune(start + Duration::from_millis(2999)));
        assert_eq!(overlays.toasts().len(), 1);

        assert!(overlays.prune(start + NOTIFICATION_TTL));
        assert!(overlays.toasts().is_empty());
        assert_eq!(overlays.next_expiry(), None);
    }

    #[test]
    fn shortcut_help_hides_itself() {
        let start = Instant::now();
        let mut overlays = Overlays::default();
        overlays.show_shortcuts(start);
        assert!(overlays.shortcuts_visible());
        assert_eq!(overlays.next_expiry(), Some(start + SHORTCUTS_TTL));

        overlays.prune(start + SHORTCUTS_TTL);
        assert!(!overlays.shortcuts_visible());
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let now = Instant::now();
        let mut overlays = Overlays::default();
        for i in 0..=MAX_TOASTS {
            overlays.notify(Notification::info(format!("n{i}")), now);
        }
        let toasts = overlays.toasts();
        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts[0].message, "n1");
    }
}
