use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::access::Screen;

/// User-visible message accompanying a forced navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn session_expired() -> Self {
        Self {
            message: "Your session has expired. Please sign in again.".to_string(),
        }
    }
}

/// Side channel the client uses to move the user to another screen.
pub trait Navigator: Send + Sync {
    fn redirect(&self, target: Screen, notice: Option<Notice>);
}

/// Forced redirect waiting to be picked up by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingRedirect {
    pub target: Screen,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Navigator that parks the latest redirect until the UI polls for it.
///
/// A later redirect replaces an earlier one, but a notice already parked is kept when the
/// replacement carries none.
#[derive(Debug, Default)]
pub struct RedirectInbox {
    pending: Mutex<Option<PendingRedirect>>,
}

impl RedirectInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<PendingRedirect> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn peek(&self) -> Option<PendingRedirect> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RedirectInbox {
    fn redirect(&self, target: Screen, notice: Option<Notice>) {
        let mut guard = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let notice = notice.or_else(|| guard.take().and_then(|previous| previous.notice));
        *guard = Some(PendingRedirect { target, notice });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_notice_across_repeated_redirects() {
        let inbox = RedirectInbox::new();
        inbox.redirect(Screen::Login, Some(Notice::session_expired()));
        inbox.redirect(Screen::Login, None);

        let pending = inbox.take().expect("redirect parked");
        assert_eq!(pending.target, Screen::Login);
        assert_eq!(pending.notice, Some(Notice::session_expired()));
        assert!(inbox.take().is_none());
    }
}
