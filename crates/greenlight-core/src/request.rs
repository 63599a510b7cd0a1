//! Approval request types.
//!
//! An [`ApprovalRequest`] is one pending authentication challenge: a rich
//! text message, a set of logo variants, an ordered list of attribute rows,
//! a status, and an expiration time. Requests are created upstream (push
//! notification, pending list) and handed to a detail screen by value; the
//! authentication SDK owns persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an approval request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Create a new random request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req:{}", self.0)
    }
}

/// Lifecycle status of an approval request.
///
/// Transitions are one-way and, with the single exception of the local
/// pending-to-expired display correction, externally driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalRequestStatus {
    /// Awaiting a decision from the user.
    Pending,
    /// The user approved the request.
    Approved,
    /// The user denied the request.
    Denied,
    /// The request expired before a decision was made.
    Expired,
}

impl ApprovalRequestStatus {
    /// Check whether the request still accepts a decision.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check whether the request has reached a terminal state.
    #[must_use]
    pub fn is_resolved(self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for ApprovalRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Denied => write!(f, "denied"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// One size variant of the requesting service's logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoVariant {
    /// Human-readable size descriptor (e.g. `"low"`, `"default"`, `"high"`).
    pub label: String,
    /// Height of the image in pixels.
    pub height: u32,
    /// Where to fetch the image from.
    pub url: String,
}

impl LogoVariant {
    /// Create a new logo variant.
    #[must_use]
    pub fn new(label: impl Into<String>, height: u32, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            height,
            url: url.into(),
        }
    }

    /// Pick the variant whose height best matches `target_height`.
    ///
    /// The rule is deterministic: minimal absolute height difference, with
    /// ties resolved toward the larger variant (downscaling loses less
    /// detail than upscaling). Returns `None` for an empty slice.
    #[must_use]
    pub fn best_fit(variants: &[Self], target_height: u32) -> Option<&Self> {
        variants.iter().reduce(|best, candidate| {
            let best_gap = best.height.abs_diff(target_height);
            let candidate_gap = candidate.height.abs_diff(target_height);
            if candidate_gap < best_gap
                || (candidate_gap == best_gap && candidate.height > best.height)
            {
                candidate
            } else {
                best
            }
        })
    }
}

/// One label/value attribute row shown on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetail {
    /// Attribute name (e.g. `"Location"`).
    pub label: String,
    /// Attribute value (e.g. `"San Francisco, CA"`).
    pub value: String,
}

impl RequestDetail {
    /// Create a new detail row.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A pending authentication challenge the user must approve or deny.
///
/// Constructed upstream and passed to the detail screen by value (a
/// serialized form is also accepted at the binary entry point). The screen
/// reads it, optionally approves or denies it through the SDK, and discards
/// it when the screen closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Unique request identifier.
    pub id: RequestId,
    /// Message body; may contain simple markup rendered as rich text.
    pub message: String,
    /// Logo variants, ordered as supplied by the service.
    #[serde(default)]
    pub logos: Vec<LogoVariant>,
    /// Attribute rows, ordered as supplied by the service.
    #[serde(default)]
    pub details: Vec<RequestDetail>,
    /// Current lifecycle status.
    pub status: ApprovalRequestStatus,
    /// When the request stops accepting a decision.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl ApprovalRequest {
    /// Create a new pending request.
    #[must_use]
    pub fn new(message: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: RequestId::new(),
            message: message.into(),
            logos: Vec::new(),
            details: Vec::new(),
            status: ApprovalRequestStatus::Pending,
            expires_at,
        }
    }

    /// Add a logo variant.
    #[must_use]
    pub fn with_logo(mut self, logo: LogoVariant) -> Self {
        self.logos.push(logo);
        self
    }

    /// Add a detail row.
    #[must_use]
    pub fn with_detail(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push(RequestDetail::new(label, value));
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: ApprovalRequestStatus) -> Self {
        self.status = status;
        self
    }

    /// Check whether the request still accepts a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Flip a pending request to expired if its expiration time has passed.
    ///
    /// This is a display-only correction applied at render time; it is never
    /// reported back to the SDK. Returns `true` if the status changed.
    /// A request whose status has already left pending is never touched.
    pub fn expire_if_past(&mut self, now: DateTime<Utc>) -> bool {
        if self.status.is_pending() && now > self.expires_at {
            self.status = ApprovalRequestStatus::Expired;
            true
        } else {
            false
        }
    }

    /// Pick the logo variant best matching `target_height`, if any.
    #[must_use]
    pub fn best_fit_logo(&self, target_height: u32) -> Option<&LogoVariant> {
        LogoVariant::best_fit(&self.logos, target_height)
    }
}

impl fmt::Display for ApprovalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.id, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn in_one_hour() -> DateTime<Utc> {
        Utc::now() + Duration::hours(1)
    }

    #[test]
    fn test_request_id() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();
        assert_ne!(id1, id2);
        assert!(id1.to_string().starts_with("req:"));
    }

    #[test]
    fn test_status_predicates() {
        assert!(ApprovalRequestStatus::Pending.is_pending());
        assert!(!ApprovalRequestStatus::Pending.is_resolved());
        assert!(ApprovalRequestStatus::Expired.is_resolved());
        assert!(ApprovalRequestStatus::Approved.is_resolved());
        assert!(ApprovalRequestStatus::Denied.is_resolved());
    }

    #[test]
    fn test_expire_if_past_flips_pending() {
        let mut request = ApprovalRequest::new("Log in?", Utc::now() - Duration::hours(1));
        assert!(request.expire_if_past(Utc::now()));
        assert_eq!(request.status, ApprovalRequestStatus::Expired);
    }

    #[test]
    fn test_expire_if_past_keeps_future_pending() {
        let mut request = ApprovalRequest::new("Log in?", in_one_hour());
        assert!(!request.expire_if_past(Utc::now()));
        assert_eq!(request.status, ApprovalRequestStatus::Pending);
    }

    #[test]
    fn test_expire_if_past_never_touches_resolved() {
        let mut request = ApprovalRequest::new("Log in?", Utc::now() - Duration::hours(1))
            .with_status(ApprovalRequestStatus::Approved);
        assert!(!request.expire_if_past(Utc::now()));
        assert_eq!(request.status, ApprovalRequestStatus::Approved);
    }

    #[test]
    fn test_best_fit_empty_is_none() {
        assert!(LogoVariant::best_fit(&[], 40).is_none());
    }

    #[test]
    fn test_best_fit_picks_closest() {
        let variants = vec![
            LogoVariant::new("low", 20, "https://cdn.example.com/logo-20.png"),
            LogoVariant::new("default", 40, "https://cdn.example.com/logo-40.png"),
            LogoVariant::new("high", 80, "https://cdn.example.com/logo-80.png"),
        ];
        let best = LogoVariant::best_fit(&variants, 36).unwrap();
        assert_eq!(best.height, 40);
    }

    #[test]
    fn test_best_fit_tie_prefers_larger() {
        let variants = vec![
            LogoVariant::new("low", 20, "https://cdn.example.com/logo-20.png"),
            LogoVariant::new("high", 60, "https://cdn.example.com/logo-60.png"),
        ];
        // 40 is equidistant from 20 and 60.
        let best = LogoVariant::best_fit(&variants, 40).unwrap();
        assert_eq!(best.height, 60);
    }

    #[test]
    fn test_best_fit_is_order_independent_on_ties() {
        let a = LogoVariant::new("low", 20, "https://cdn.example.com/a.png");
        let b = LogoVariant::new("high", 60, "https://cdn.example.com/b.png");
        let forward = LogoVariant::best_fit(&[a.clone(), b.clone()], 40)
            .unwrap()
            .height;
        let backward = LogoVariant::best_fit(&[b, a], 40).unwrap().height;
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_request_builder() {
        let request = ApprovalRequest::new("Approve <b>login</b>?", in_one_hour())
            .with_logo(LogoVariant::new("default", 40, "https://cdn.example.com/logo.png"))
            .with_detail("Location", "San Francisco, CA")
            .with_detail("IP Address", "192.0.2.17");

        assert!(request.is_pending());
        assert_eq!(request.logos.len(), 1);
        assert_eq!(request.details.len(), 2);
        assert_eq!(request.details[0].label, "Location");
    }

    #[test]
    fn test_request_serialization_roundtrip() {
        let request = ApprovalRequest::new("Log in?", in_one_hour())
            .with_detail("Device", "Pixel 9");
        let json = serde_json::to_string(&request).unwrap();
        let deserialized: ApprovalRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.id, deserialized.id);
        assert_eq!(request.details, deserialized.details);
        assert_eq!(request.status, deserialized.status);
    }

    #[test]
    fn test_expiration_serializes_as_epoch_seconds() {
        let request = ApprovalRequest::new("Log in?", in_one_hour());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["expires_at"].as_i64(),
            Some(request.expires_at.timestamp())
        );
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ApprovalRequestStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
