use crate::presets::{PresetEntry, builtin_presets};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChanselConfig {
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default = "builtin_presets")]
    pub presets: Vec<PresetEntry>,
}

impl Default for ChanselConfig {
    fn default() -> Self {
        Self {
            timeouts: TimeoutConfig::default(),
            presets: builtin_presets(),
        }
    }
}

/// Configurable waits. The click settle delay and the post-click
/// verification window are fixed and live in `primitives`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_image_ready_timeout_ms")]
    pub image_ready_timeout_ms: u64,
    #[serde(default = "default_confirm_timeout_ms")]
    pub confirm_timeout_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            image_ready_timeout_ms: default_image_ready_timeout_ms(),
            confirm_timeout_ms: default_confirm_timeout_ms(),
        }
    }
}

impl TimeoutConfig {
    pub fn image_ready(&self) -> Duration {
        Duration::from_millis(self.image_ready_timeout_ms)
    }

    pub fn confirm(&self) -> Duration {
        Duration::from_millis(self.confirm_timeout_ms)
    }
}

fn default_image_ready_timeout_ms() -> u64 {
    10000
}

fn default_confirm_timeout_ms() -> u64 {
    10000
}
