//! Sparkplug B defaults

use serde::Deserialize;

/// Node addressed by a rebirth when no Sparkplug message has been seen
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SparkplugConfig {
    /// Default: "tedge"
    pub group: String,
    /// Default: "gateway01"
    pub node: String,
}

impl Default for SparkplugConfig {
    fn default() -> Self {
        Self {
            group: "tedge".into(),
            node: "gateway01".into(),
        }
    }
}
