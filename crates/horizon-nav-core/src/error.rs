//! Error types for Horizon Nav.
//!
//! Navigation operations themselves never fail: a request that matches
//! nothing is a no-op. The only loud failure is resolving the window
//! navigator that owns a page or modal, which is what [`NavError`] describes.

/// Result type alias for navigator resolution.
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors raised while resolving a parent navigator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// The page or modal was never handed to a navigator.
    #[error("'{id}' is not attached to a navigator")]
    Detached {
        /// ID of the page or modal.
        id: String,
    },

    /// The navigator that displayed the page or modal has been dropped.
    #[error("the navigator that displayed '{id}' no longer exists")]
    NavigatorDropped {
        /// ID of the page or modal.
        id: String,
    },

    /// The parent chain ended without reaching a window navigator.
    #[error("no window navigator above '{id}'")]
    NoWindowNavigator {
        /// ID of the page or modal.
        id: String,
    },
}

impl NavError {
    /// Create a detached error.
    pub fn detached(id: impl Into<String>) -> Self {
        Self::Detached { id: id.into() }
    }

    /// Create a dropped-navigator error.
    pub fn navigator_dropped(id: impl Into<String>) -> Self {
        Self::NavigatorDropped { id: id.into() }
    }

    /// Create an unresolved-window error.
    pub fn no_window_navigator(id: impl Into<String>) -> Self {
        Self::NoWindowNavigator { id: id.into() }
    }

    /// ID of the page or modal the error is about.
    pub fn id(&self) -> &str {
        match self {
            Self::Detached { id } | Self::NavigatorDropped { id } | Self::NoWindowNavigator { id } => {
                id
            }
        }
    }
}
