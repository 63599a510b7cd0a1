//! Test fixtures for common types.

use chrono::{Duration, Utc};

use greenlight_core::{ApprovalRequest, ApprovalRequestStatus, LogoVariant};

/// A pending request expiring five minutes from now, with logos and details.
#[must_use]
pub fn pending_request() -> ApprovalRequest {
    let expires_at = Utc::now()
        .checked_add_signed(Duration::minutes(5))
        .unwrap_or_else(Utc::now);
    ApprovalRequest::new(
        "Do you want to log in to <b>Example Bank</b> from a new device?",
        expires_at,
    )
    .with_logo(LogoVariant::new("low", 20, "https://cdn.example.com/logo-20.png"))
    .with_logo(LogoVariant::new("default", 40, "https://cdn.example.com/logo-40.png"))
    .with_logo(LogoVariant::new("high", 80, "https://cdn.example.com/logo-80.png"))
    .with_detail("Location", "San Francisco, CA")
    .with_detail("IP Address", "192.0.2.17")
    .with_detail("Device", "Pixel 9")
}

/// A pending request with no logos and no details.
#[must_use]
pub fn bare_pending_request() -> ApprovalRequest {
    let expires_at = Utc::now()
        .checked_add_signed(Duration::minutes(5))
        .unwrap_or_else(Utc::now);
    ApprovalRequest::new("Log in to Example Bank?", expires_at)
}

/// A request whose expiration time passed one hour ago but whose status is
/// still pending, as delivered by a stale upstream list.
#[must_use]
pub fn stale_pending_request() -> ApprovalRequest {
    let expires_at = Utc::now()
        .checked_sub_signed(Duration::hours(1))
        .unwrap_or_else(Utc::now);
    ApprovalRequest::new("Log in to Example Bank?", expires_at)
        .with_detail("Location", "San Francisco, CA")
}

/// A request already resolved to `status`.
#[must_use]
pub fn resolved_request(status: ApprovalRequestStatus) -> ApprovalRequest {
    pending_request().with_status(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_request_is_pending() {
        assert!(pending_request().is_pending());
    }

    #[test]
    fn stale_pending_request_expires_on_correction() {
        let mut request = stale_pending_request();
        assert!(request.expire_if_past(Utc::now()));
        assert_eq!(request.status, ApprovalRequestStatus::Expired);
    }

    #[test]
    fn resolved_request_has_status() {
        let request = resolved_request(ApprovalRequestStatus::Denied);
        assert_eq!(request.status, ApprovalRequestStatus::Denied);
    }
}
