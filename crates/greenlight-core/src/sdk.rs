//! The authentication SDK contract consumed by the frontend.
//!
//! The SDK itself (request signing, transport, cryptographic approval)
//! is an external collaborator. Frontends receive an implementation of
//! [`AuthClient`] by injection and never reach for a process-wide instance.

use async_trait::async_trait;
use thiserror::Error;

use crate::request::ApprovalRequest;

/// Errors surfaced by the authentication SDK.
///
/// From the screen's point of view there is exactly one error kind,
/// "action failed", caught at the screen boundary and converted into a
/// user-visible transient message. The variants exist for diagnostics.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The SDK could not reach the authentication service.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service refused the operation.
    #[error("service rejected the operation: {0}")]
    Rejected(String),

    /// The device's registration no longer exists.
    #[error("device registration was deleted")]
    DeviceDeleted,
}

/// Result alias for SDK operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Client interface of the external authentication SDK.
///
/// Both decision operations block on network I/O, so frontends must invoke
/// them off the UI context. Timeouts are the SDK's responsibility.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Approve a pending request.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the decision could not be delivered.
    async fn approve_request(&self, request: &ApprovalRequest) -> AuthResult<()>;

    /// Deny a pending request.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the decision could not be delivered.
    async fn deny_request(&self, request: &ApprovalRequest) -> AuthResult<()>;

    /// Check whether this device still holds a valid registration.
    async fn is_device_registered(&self) -> bool;
}

/// Why the user is being sent to the registration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationReason {
    /// The device's registration was deleted on the service side.
    DeviceDeleted,
    /// The device was never registered.
    NeverRegistered,
}

impl RegistrationReason {
    /// User-facing explanation for the registration screen.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::DeviceDeleted => {
                "This device's registration was deleted. Register again to keep approving requests."
            },
            Self::NeverRegistered => "This device is not registered yet.",
        }
    }
}

impl std::fmt::Display for RegistrationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeviceDeleted => write!(f, "device_deleted"),
            Self::NeverRegistered => write!(f, "never_registered"),
        }
    }
}
