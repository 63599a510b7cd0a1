//! Events and navigation.
//!
//! Background work never touches screen state directly: it sends an
//! [`AppEvent`] through the app's channel, and the UI loop applies the
//! result at a single resumption point. Screens answer key and app events
//! with an optional [`Nav`] that the app shell executes.

use greenlight_core::{AuthError, ImageError, LogoArt, RegistrationReason};

/// Which decision the user took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAction {
    /// Approve the request.
    Approve,
    /// Deny the request.
    Deny,
}

impl ApprovalAction {
    /// Short verb for log lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Deny => "deny",
        }
    }

    /// Notice text for a completed action.
    #[must_use]
    pub fn success_text(self) -> &'static str {
        match self {
            Self::Approve => "Request approved",
            Self::Deny => "Request denied",
        }
    }

    /// Notice text for a failed action.
    #[must_use]
    pub fn failure_text(self) -> &'static str {
        match self {
            Self::Approve => "Could not approve the request",
            Self::Deny => "Could not deny the request",
        }
    }
}

/// Result of one background SDK call.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The SDK delivered the decision.
    Success,
    /// The SDK call failed; the registration check ran in the same
    /// background unit so the UI loop never blocks on it.
    Failure {
        /// The error raised by the SDK.
        error: AuthError,
        /// Whether the device still holds a valid registration.
        device_registered: bool,
    },
}

/// An event delivered to the UI loop from background work.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// An approve/deny call finished.
    Action {
        /// Generation of the screen that dispatched the call; stale
        /// outcomes are dropped.
        generation: u64,
        /// Which decision was dispatched.
        action: ApprovalAction,
        /// How the call ended.
        outcome: ActionOutcome,
    },
    /// A logo load finished.
    Logo {
        /// Generation of the screen that requested the load.
        generation: u64,
        /// The rendered art, or the error to fall back from.
        result: Result<LogoArt, ImageError>,
    },
}

/// Navigation requested by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    /// Close the current screen (for this single-screen app: quit).
    Close,
    /// Replace the current screen with the registration screen.
    Registration(RegistrationReason),
}
