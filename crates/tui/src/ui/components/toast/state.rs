use std::collections::VecDeque;
use std::time::Instant;

use digitalfront_types::Toast;

/// Toasts beyond this count push the oldest one out.
pub const MAX_VISIBLE_TOASTS: usize = 3;

#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub id: u64,
    pub toast: Toast,
    pub shown_at: Instant,
}

impl ActiveToast {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.toast.duration
    }
}

/// Stack of transient notifications, newest last.
#[derive(Debug, Clone, Default)]
pub struct ToastState {
    toasts: VecDeque<ActiveToast>,
    next_id: u64,
}

impl ToastState {
    pub fn push(&mut self, toast: Toast, now: Instant) -> u64 {
        self.next_id += 1;
        if self.toasts.len() == MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(ActiveToast {
            id: self.next_id,
            toast,
            shown_at: now,
        });
        self.next_id
    }

    /// Drops expired toasts; returns `true` when anything was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| !toast.is_expired(now));
        before != self.toasts.len()
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        before != self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveToast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn toast(title: &str, millis: u64) -> Toast {
        Toast::new(title, "", Duration::from_millis(millis))
    }

    #[test]
    fn toasts_expire_after_their_duration() {
        let start = Instant::now();
        let mut state = ToastState::default();
        state.push(toast("short", 1000), start);
        state.push(toast("long", 3000), start);

        assert!(!state.expire(start + Duration::from_millis(999)));
        assert!(state.expire(start + Duration::from_millis(1000)));
        assert_eq!(state.iter().map(|t| t.toast.title.as_str()).collect::<Vec<_>>(), vec!["long"]);
        assert!(state.expire(start + Duration::from_secs(3)));
        assert!(state.is_empty());
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let now = Instant::now();
        let mut state = ToastState::default();
        for idx in 0..=MAX_VISIBLE_TOASTS {
            state.push(toast(&format!("t{idx}"), 3000), now);
        }
        assert_eq!(state.len(), MAX_VISIBLE_TOASTS);
        assert_eq!(state.iter().next().map(|t| t.toast.title.as_str()), Some("t1"));
    }

    #[test]
    fn dismiss_by_id() {
        let now = Instant::now();
        let mut state = ToastState::default();
        let id = state.push(toast("a", 3000), now);
        assert!(state.dismiss(id));
        assert!(!state.dismiss(id));
    }
}
