//! Greenlight TUI - terminal frontend for approval requests.
//!
//! Renders one approval request in full detail (rich text message, logo,
//! attribute rows) and lets the user approve or deny it. The decision is
//! delegated to an injected [`greenlight_core::AuthClient`]; the SDK call
//! runs on a background task while the UI loop stays responsive.
//!
//! The screen logic ([`screen::DetailScreen`], [`render::RenderState`]) is
//! independent of the terminal and fully testable headless.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::arithmetic_side_effects))]

pub mod app;
pub mod config;
pub mod demo;
pub mod error;
pub mod event;
pub mod markup;
pub mod notice;
pub mod registration;
pub mod render;
pub mod screen;
pub mod terminal;
pub mod theme;

pub use app::{App, Route};
pub use config::FrontendConfig;
pub use error::{FrontendError, FrontendResult};
pub use event::{ActionOutcome, AppEvent, ApprovalAction, Nav};
pub use screen::DetailScreen;
