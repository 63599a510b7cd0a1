//! Greenlight Test - shared test utilities for the approval frontend.
//!
//! This crate provides mock SDK/loader implementations and request
//! fixtures used across the workspace as a dev-dependency.
//!
//! ```rust
//! use greenlight_test::{MockAuthClient, pending_request};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use greenlight_core::AuthClient;
//!
//! let client = MockAuthClient::new();
//! let request = pending_request();
//! client.approve_request(&request).await.unwrap();
//! assert_eq!(client.approve_calls(), vec![request.id]);
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::arithmetic_side_effects))]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
