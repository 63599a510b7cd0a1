//! Logo loading contract.
//!
//! Terminal frontends can't blit bitmaps, so a loader turns a logo URL into
//! [`LogoArt`], pre-rendered text lines. Loading is asynchronous with a
//! built-in placeholder shown immediately and kept on failure.

use async_trait::async_trait;
use thiserror::Error;

/// Text-art rendering of a service logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoArt {
    /// Lines of the rendering, top to bottom.
    pub lines: Vec<String>,
}

impl LogoArt {
    /// Create art from pre-rendered lines.
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// The built-in default logo, shown before a load completes, when the
    /// request carries no logos, and when a load fails.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(
            [
                "  ▄█████▄  ",
                " ██ ▀▀▀ ██ ",
                " ██ ███ ██ ",
                " ▀██▄▄▄██▀ ",
                "   ▀▀▀▀▀   ",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        )
    }

    /// Height of the rendering in terminal rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

impl Default for LogoArt {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Errors produced by an [`ImageLoader`].
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    /// The image could not be fetched.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The image could not be rendered for the terminal.
    #[error("render failed: {0}")]
    Render(String),
}

/// Asynchronous image-fetch-and-render utility.
///
/// Implementations live with the hosting application (or its SDK vendor);
/// the frontend only depends on this seam.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Fetch `url` and render it as terminal art.
    ///
    /// # Errors
    ///
    /// Returns an [`ImageError`] when fetching or rendering fails; callers
    /// fall back to [`LogoArt::placeholder`].
    async fn load(&self, url: &str) -> Result<LogoArt, ImageError>;
}
