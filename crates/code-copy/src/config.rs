//! Copy-control configuration.
//!
//! The server reads it from the `[copy]` table of a TOML file and embeds it in
//! the page as JSON; the browser side reads it back. Every field has a default
//! so an empty file (or no file at all) gives the stock behaviour.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Marker class emitted by the `CodeBlock` component and matched by default.
pub const DEFAULT_BLOCK_CLASS: &str = "code-block";

/// Longest reset delay a browser timer can hold (`setTimeout` takes an i32).
pub const MAX_RESET_DELAY_MS: u64 = i32::MAX as u64;

/// `id` of the `<script type="application/json">` element carrying the config.
pub const CONFIG_ELEMENT_ID: &str = "code-copy-config";

// ── TOML shape ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    copy: CopyConfig,
}

// ── Public config ─────────────────────────────────────────────────────────────

/// What to do with earlier pending resets when a control is activated again
/// before its label has gone back to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// The latest successful copy supersedes earlier resets: the label stays
    /// "copied" until the newest timer fires.
    #[default]
    Restart,
    /// Every timer resets the label when it fires, even if a newer copy
    /// happened in the meantime.
    Independent,
}

/// Icon class plus text shown on a control in one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub icon: String,
    pub text: String,
}

impl LabelConfig {
    fn new(icon: &str, text: &str) -> Self {
        Self {
            icon: icon.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// CSS selector identifying code blocks
    pub block_selector: String,
    /// CSS selector, relative to a block, of the element holding the text
    pub payload_selector: String,
    /// Class attribute of the injected button
    pub button_class: String,
    pub idle: LabelConfig,
    pub copied: LabelConfig,
    /// How long "copied" stays up after a successful write
    pub reset_delay_ms: u64,
    /// Distance of the button from the block's top and right edges
    pub inset_px: u32,
    pub reset_policy: ResetPolicy,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            block_selector: format!(".{}", DEFAULT_BLOCK_CLASS),
            payload_selector: "code".to_string(),
            button_class: "btn btn-sm btn-outline-secondary copy-btn".to_string(),
            idle: LabelConfig::new("fas fa-copy", "Copy"),
            copied: LabelConfig::new("fas fa-check", "Copied!"),
            reset_delay_ms: 2000,
            inset_px: 10,
            reset_policy: ResetPolicy::default(),
        }
    }
}

impl CopyConfig {
    /// Load config from a TOML file with a `[copy]` table.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(content).context("Failed to parse TOML")?;
        file.copy.validate()?;
        Ok(file.copy)
    }

    /// Parse the JSON form embedded in the page.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("block_selector", &self.block_selector),
            ("payload_selector", &self.payload_selector),
            ("button_class", &self.button_class),
            ("idle.text", &self.idle.text),
            ("copied.text", &self.copied.text),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
        }
        if self.reset_delay_ms == 0 {
            anyhow::bail!("reset_delay_ms must be greater than zero");
        }
        if self.reset_delay_ms > MAX_RESET_DELAY_MS {
            anyhow::bail!("reset_delay_ms must be at most {}", MAX_RESET_DELAY_MS);
        }
        Ok(())
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn label(&self, state: crate::state::ControlState) -> &LabelConfig {
        match state {
            crate::state::ControlState::Idle => &self.idle,
            crate::state::ControlState::Copied => &self.copied,
        }
    }
}
