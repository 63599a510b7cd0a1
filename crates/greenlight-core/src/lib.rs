//! Greenlight Core - domain types for the approval-request frontend.
//!
//! This crate defines the data model shared by Greenlight frontends:
//!
//! - [`ApprovalRequest`] and friends: one pending authentication challenge
//!   the user must approve or deny
//! - [`AuthClient`]: the contract of the external authentication SDK that
//!   performs the actual approve/deny operation
//! - [`ImageLoader`]: the contract of the asynchronous logo loader
//!
//! Frontends receive an [`AuthClient`] by injection; this crate never talks
//! to the network itself.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::arithmetic_side_effects))]

pub mod logo;
pub mod request;
pub mod sdk;

/// Prelude re-exports for convenient use.
pub mod prelude {
    pub use crate::logo::{ImageError, ImageLoader, LogoArt};
    pub use crate::request::{
        ApprovalRequest, ApprovalRequestStatus, LogoVariant, RequestDetail, RequestId,
    };
    pub use crate::sdk::{AuthClient, AuthError, AuthResult, RegistrationReason};
}

// Re-export key types at crate root for convenience.
pub use logo::{ImageError, ImageLoader, LogoArt};
pub use request::{ApprovalRequest, ApprovalRequestStatus, LogoVariant, RequestDetail, RequestId};
pub use sdk::{AuthClient, AuthError, AuthResult, RegistrationReason};
