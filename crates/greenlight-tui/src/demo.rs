//! Simulated SDK and image loader for the reference binary.
//!
//! The real authentication SDK is supplied by the hosting application; the
//! `greenlight` binary is a self-contained harness, so it ships a simulated
//! client with configurable latency and outcome. No network I/O happens
//! here.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use std::time::Duration;

use greenlight_core::{
    ApprovalRequest, AuthClient, AuthError, AuthResult, ImageError, ImageLoader, LogoArt,
    LogoVariant,
};

/// How the simulated SDK resolves decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoOutcome {
    /// Every decision succeeds.
    Succeed,
    /// Every decision fails; the device stays registered.
    Fail,
    /// Every decision fails and the device registration is gone.
    FailDeregistered,
}

/// Simulated [`AuthClient`] with network-ish latency.
pub struct DemoAuthClient {
    latency: Duration,
    outcome: DemoOutcome,
}

impl DemoAuthClient {
    /// Create a simulated client resolving per `outcome`.
    #[must_use]
    pub fn new(outcome: DemoOutcome) -> Self {
        Self {
            latency: Duration::from_millis(600),
            outcome,
        }
    }

    /// Override the simulated latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn resolve(&self) -> AuthResult<()> {
        tokio::time::sleep(self.latency).await;
        match self.outcome {
            DemoOutcome::Succeed => Ok(()),
            DemoOutcome::Fail | DemoOutcome::FailDeregistered => {
                Err(AuthError::Transport("simulated outage".to_string()))
            },
        }
    }
}

#[async_trait]
impl AuthClient for DemoAuthClient {
    async fn approve_request(&self, _request: &ApprovalRequest) -> AuthResult<()> {
        self.resolve().await
    }

    async fn deny_request(&self, _request: &ApprovalRequest) -> AuthResult<()> {
        self.resolve().await
    }

    async fn is_device_registered(&self) -> bool {
        self.outcome != DemoOutcome::FailDeregistered
    }
}

/// Simulated [`ImageLoader`] that "fetches" a stylized logo.
pub struct DemoImageLoader {
    latency: Duration,
}

impl DemoImageLoader {
    /// Create the loader with its default latency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(900),
        }
    }
}

impl Default for DemoImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageLoader for DemoImageLoader {
    async fn load(&self, _url: &str) -> Result<LogoArt, ImageError> {
        tokio::time::sleep(self.latency).await;
        Ok(LogoArt::new(
            [
                " ███████████ ",
                " ██ EXAMPLE█ ",
                " ██  BANK ██ ",
                " ███████████ ",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        ))
    }
}

/// The bundled demo request.
#[must_use]
pub fn demo_request() -> ApprovalRequest {
    let expires_at = Utc::now()
        .checked_add_signed(ChronoDuration::minutes(5))
        .unwrap_or_else(Utc::now);
    ApprovalRequest::new(
        "Do you want to log in to <b>Example Bank</b> from a new device?",
        expires_at,
    )
    .with_logo(LogoVariant::new("low", 20, "https://cdn.example.com/logo-20.png"))
    .with_logo(LogoVariant::new("default", 40, "https://cdn.example.com/logo-40.png"))
    .with_logo(LogoVariant::new("high", 80, "https://cdn.example.com/logo-80.png"))
    .with_detail("Service", "Example Bank")
    .with_detail("Location", "San Francisco, CA")
    .with_detail("IP Address", "192.0.2.17")
    .with_detail("Device", "Pixel 9")
}
