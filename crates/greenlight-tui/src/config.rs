//! Frontend configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{FrontendError, FrontendResult};

/// Tunables for the terminal frontend.
///
/// Loaded from an optional TOML file; every field has a default so an empty
/// file (or no file at all) is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// How long a transient notification stays up before auto-dismissing.
    pub notice_ttl_secs: u64,
    /// Target logo height in pixels for best-fit variant selection.
    pub logo_target_height: u32,
    /// UI tick interval in milliseconds (drives notice expiry).
    pub tick_ms: u64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            notice_ttl_secs: 6,
            logo_target_height: 40,
            tick_ms: 250,
        }
    }
}

impl FrontendConfig {
    /// Load configuration from `path`, or defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError::Config`] when the file cannot be read,
    /// parsed, or fails validation.
    pub fn load(path: Option<&Path>) -> FrontendResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|e| FrontendError::Config(format!("{}: {e}", path.display())))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| FrontendError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Notice lifetime as a [`Duration`].
    #[must_use]
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }

    fn validate(&self) -> FrontendResult<()> {
        if self.tick_ms == 0 {
            return Err(FrontendError::Config("tick_ms must be positive".to_string()));
        }
        if self.notice_ttl_secs == 0 {
            return Err(FrontendError::Config(
                "notice_ttl_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
