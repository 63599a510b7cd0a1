//! Mock implementations for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use greenlight_core::{
    ApprovalRequest, AuthClient, AuthError, AuthResult, ImageError, ImageLoader, LogoArt,
    RequestId,
};

/// One recorded call against a [`MockAuthClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkCall {
    /// `approve_request` was invoked for this request.
    Approve(RequestId),
    /// `deny_request` was invoked for this request.
    Deny(RequestId),
    /// `is_device_registered` was invoked.
    RegistrationCheck,
}

/// Mock implementation of the [`AuthClient`] trait for testing.
///
/// Uses `std::sync::Mutex` internally so builder methods work without a
/// tokio runtime. Cloning shares the recorded calls and configuration.
#[derive(Debug, Clone)]
pub struct MockAuthClient {
    /// Error returned by approve/deny calls, if configured.
    failure: Arc<Mutex<Option<AuthError>>>,
    /// Answer for registration checks.
    device_registered: Arc<Mutex<bool>>,
    /// Every call made against this mock, in order.
    calls: Arc<Mutex<Vec<SdkCall>>>,
}

impl MockAuthClient {
    /// Create a mock whose calls all succeed on a registered device.
    #[must_use]
    pub fn new() -> Self {
        Self {
            failure: Arc::new(Mutex::new(None)),
            device_registered: Arc::new(Mutex::new(true)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make approve/deny calls fail with `error` until cleared.
    #[must_use]
    pub fn with_failure(self, error: AuthError) -> Self {
        if let Ok(mut guard) = self.failure.lock() {
            *guard = Some(error);
        }
        self
    }

    /// Set the answer for registration checks.
    #[must_use]
    pub fn with_device_registered(self, registered: bool) -> Self {
        if let Ok(mut guard) = self.device_registered.lock() {
            *guard = registered;
        }
        self
    }

    /// Clear a configured failure so later calls succeed.
    pub fn clear_failure(&self) {
        if let Ok(mut guard) = self.failure.lock() {
            *guard = None;
        }
    }

    /// All calls recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<SdkCall> {
        self.calls.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// IDs of requests that were approved through this mock.
    #[must_use]
    pub fn approve_calls(&self) -> Vec<RequestId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SdkCall::Approve(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// IDs of requests that were denied through this mock.
    #[must_use]
    pub fn deny_calls(&self) -> Vec<RequestId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SdkCall::Deny(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SdkCall) {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(call);
        }
    }

    fn configured_result(&self) -> AuthResult<()> {
        match self.failure.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            },
            Err(_) => Ok(()),
        }
    }
}

impl Default for MockAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthClient for MockAuthClient {
    async fn approve_request(&self, request: &ApprovalRequest) -> AuthResult<()> {
        self.record(SdkCall::Approve(request.id.clone()));
        self.configured_result()
    }

    async fn deny_request(&self, request: &ApprovalRequest) -> AuthResult<()> {
        self.record(SdkCall::Deny(request.id.clone()));
        self.configured_result()
    }

    async fn is_device_registered(&self) -> bool {
        self.record(SdkCall::RegistrationCheck);
        self.device_registered.lock().map(|guard| *guard).unwrap_or(true)
    }
}

/// Mock implementation of the [`ImageLoader`] trait for testing.
///
/// Records every URL it is asked to load and returns either configured art
/// or a fetch error.
#[derive(Debug, Clone)]
pub struct MockImageLoader {
    art: Arc<Mutex<Option<LogoArt>>>,
    fail: Arc<Mutex<bool>>,
    loaded_urls: Arc<Mutex<Vec<String>>>,
}

impl MockImageLoader {
    /// Create a loader that returns `art` for every URL.
    #[must_use]
    pub fn new(art: LogoArt) -> Self {
        Self {
            art: Arc::new(Mutex::new(Some(art))),
            fail: Arc::new(Mutex::new(false)),
            loaded_urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a loader whose loads all fail.
    #[must_use]
    pub fn failing() -> Self {
        let loader = Self::new(LogoArt::placeholder());
        if let Ok(mut guard) = loader.fail.lock() {
            *guard = true;
        }
        loader
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn loaded_urls(&self) -> Vec<String> {
        self.loaded_urls
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ImageLoader for MockImageLoader {
    async fn load(&self, url: &str) -> Result<LogoArt, ImageError> {
        if let Ok(mut guard) = self.loaded_urls.lock() {
            guard.push(url.to_string());
        }
        let failing = self.fail.lock().map(|guard| *guard).unwrap_or(false);
        if failing {
            return Err(ImageError::Fetch(format!("mock failure for {url}")));
        }
        let art = self.art.lock().ok().and_then(|guard| guard.clone());
        Ok(art.unwrap_or_default())
    }
}
