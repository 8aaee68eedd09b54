//! Application configuration.
//!
//! [`AppConfig`] can be built in code or loaded from TOML. Missing keys fall
//! back to their defaults:
//!
//! ```toml
//! title = "Wallet"
//! event_queue_capacity = 512
//! modal_input = "top_only"   # or "all"
//! toast_duration_ms = 2500
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Default capacity of the window event queue.
const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 256;

/// Default time a toast stays on screen.
const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Which modals take part in per-frame interaction and key handling.
///
/// Every modal is always drawn; this only controls input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalInputPolicy {
    /// Only the most recently shown modal handles input.
    #[default]
    TopOnly,
    /// Every shown modal handles input, bottom first.
    All,
}

/// Configuration for creating an [`App`](crate::App).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window title, passed through to the window backend.
    pub title: String,
    /// Capacity of the window event queue. Senders block when it is full.
    pub event_queue_capacity: usize,
    /// Modal input routing.
    pub modal_input: ModalInputPolicy,
    /// How long a toast stays visible, in milliseconds.
    pub toast_duration_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Horizon Nav".to_string(),
            event_queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY,
            modal_input: ModalInputPolicy::default(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}

impl AppConfig {
    /// Create a configuration with the given window title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| AppError::io(path, err))?;
        Self::from_toml_str(&text)
    }

    /// Set the event queue capacity.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.event_queue_capacity = capacity;
        self
    }

    /// Set the modal input policy.
    pub fn modal_input(mut self, policy: ModalInputPolicy) -> Self {
        self.modal_input = policy;
        self
    }

    /// Set how long toasts stay visible.
    pub fn toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// How long toasts stay visible.
    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.event_queue_capacity == 0 {
            return Err(AppError::invalid_config(
                "event_queue_capacity",
                "must be at least 1",
            ));
        }
        if self.toast_duration_ms == 0 {
            return Err(AppError::invalid_config(
                "toast_duration_ms",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
