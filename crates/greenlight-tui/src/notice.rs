//! Transient notifications.
//!
//! A [`Notice`] is a temporary, dismissible banner shown at the bottom of
//! the screen, optionally carrying an action the user can trigger while it
//! is up. Notices auto-dismiss after their TTL; whoever owns the notice
//! decides what a dismissal means (a success notice closes the screen).

use std::time::{Duration, Instant};

/// What kind of outcome a notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The action completed; dismissal closes the screen.
    Success,
    /// The action failed; the notice may offer a recovery action.
    Failure,
}

/// An action offered on a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    /// Re-run the full render step with the same request.
    Refresh,
}

impl NoticeAction {
    /// Button label for the action.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Refresh => "Refresh",
        }
    }
}

/// A transient, dismissible notification.
#[derive(Debug, Clone)]
pub struct Notice {
    text: String,
    kind: NoticeKind,
    action: Option<NoticeAction>,
    shown_at: Instant,
    ttl: Duration,
}

impl Notice {
    /// Create a success notice.
    #[must_use]
    pub fn success(text: impl Into<String>, ttl: Duration) -> Self {
        Self::new(text, NoticeKind::Success, ttl)
    }

    /// Create a failure notice.
    #[must_use]
    pub fn failure(text: impl Into<String>, ttl: Duration) -> Self {
        Self::new(text, NoticeKind::Failure, ttl)
    }

    fn new(text: impl Into<String>, kind: NoticeKind, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            kind,
            action: None,
            shown_at: Instant::now(),
            ttl,
        }
    }

    /// Attach an action to the notice.
    #[must_use]
    pub fn with_action(mut self, action: NoticeAction) -> Self {
        self.action = Some(action);
        self
    }

    /// The notice text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// What kind of outcome this notice reports.
    #[must_use]
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// The offered action, if any.
    #[must_use]
    pub fn action(&self) -> Option<NoticeAction> {
        self.action
    }

    /// Whether the notice offers the refresh action.
    #[must_use]
    pub fn offers_refresh(&self) -> bool {
        matches!(self.action, Some(NoticeAction::Refresh))
    }

    /// Whether the notice has outlived its TTL and should auto-dismiss.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_notice_is_not_expired() {
        let notice = Notice::success("done", Duration::from_secs(60));
        assert!(!notice.is_expired());
        assert_eq!(notice.kind(), NoticeKind::Success);
        assert_eq!(notice.text(), "done");
    }

    #[test]
    fn notice_expires_after_ttl() {
        let notice = Notice::failure("failed", Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        assert!(notice.is_expired());
    }

    #[test]
    fn zero_ttl_immediately_expires() {
        let notice = Notice::success("done", Duration::ZERO);
        assert!(notice.is_expired());
    }

    #[test]
    fn action_is_optional() {
        let plain = Notice::failure("failed", Duration::from_secs(1));
        assert!(!plain.offers_refresh());

        let with_refresh = plain.with_action(NoticeAction::Refresh);
        assert!(with_refresh.offers_refresh());
        assert_eq!(with_refresh.action().map(NoticeAction::label), Some("Refresh"));
    }
}
