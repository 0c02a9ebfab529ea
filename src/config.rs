//! Application configuration.
//!
//! The configuration is loaded from a JSON file.  Every section is optional
//! and unknown keys are ignored, so `{}` is a valid file.
//!
//! # Example
//!
//! ```json
//! {
//!   "defaults": {
//!     "duration_ms": 600,
//!     "offset": -20,
//!     "easing": "ease-out-cubic",
//!     "a11y": true
//!   },
//!   "document": {
//!     "scroll_top": 0,
//!     "frame_ms": 16.0,
//!     "elements": { "#intro": 1200.0, "#footer": 4800.0 },
//!     "containers": { "#sidebar": 0.0 },
//!     "nested": { "#sidebar": { "#item-3": 90.0 } },
//!     "target": "#footer"
//!   }
//! }
//! ```

use crate::options::JumpDefaults;
use crate::target::TargetSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fallbacks for options a jump leaves unset.
    #[serde(default)]
    pub defaults: JumpDefaults,

    /// Layout of the headless document the CLI animates.
    #[serde(default)]
    pub document: DocumentConfig,
}

/// Layout and frame rate of a headless document.
///
/// Element positions are document-absolute, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Initial viewport offset (px).
    pub scroll_top: f64,
    /// Time between simulated frames (ms).
    pub frame_ms: f64,
    /// `selector -> top`.
    pub elements: HashMap<String, f64>,
    /// `selector -> initial scroll offset`.
    pub containers: HashMap<String, f64>,
    /// `container -> { selector -> top within the container }`.
    pub nested: HashMap<String, HashMap<String, f64>>,
    /// Jump target used when none is given on the command line: a pixel
    /// delta (number) or a selector (string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetSpec>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            scroll_top: 0.0,
            frame_ms: 1000.0 / 60.0,
            elements: HashMap::new(),
            containers: HashMap::new(),
            nested: HashMap::new(),
            target: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
