//! The registration screen.
//!
//! Navigation target when the device no longer holds a valid registration.
//! The registration flow itself belongs to the host application; this
//! screen explains why the user landed here and lets them leave.

use crossterm::event::{KeyCode, KeyEvent};

use greenlight_core::RegistrationReason;

use crate::event::Nav;

/// Screen shown when the device must be (re-)registered.
pub struct RegistrationScreen {
    reason: RegistrationReason,
}

impl RegistrationScreen {
    /// Create the screen for `reason`.
    #[must_use]
    pub fn new(reason: RegistrationReason) -> Self {
        Self { reason }
    }

    /// Why the user was sent here.
    #[must_use]
    pub fn reason(&self) -> RegistrationReason {
        self.reason
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Nav> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Nav::Close),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_reason() {
        let screen = RegistrationScreen::new(RegistrationReason::DeviceDeleted);
        assert_eq!(screen.reason(), RegistrationReason::DeviceDeleted);
    }

    #[test]
    fn exit_keys_close() {
        use crossterm::event::KeyModifiers;

        let mut screen = RegistrationScreen::new(RegistrationReason::DeviceDeleted);
        for code in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('q')] {
            assert_eq!(
                screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE)),
                Some(Nav::Close)
            );
        }
        assert_eq!(
            screen.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
    }
}
