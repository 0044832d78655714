//! Configuration types for reply rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field is optional and falls back to a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and terminal settings.
//! - [`RenderConfig`] - Colors and fonts of the SVG output.
//! - [`TerminalConfig`] - How unknown terminal names are resolved.
//!
//! # Example
//!
//! ```
//! # use voltchat::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.render().background_color().unwrap().is_none());
//! ```

use serde::Deserialize;

use voltchat_core::{color::Color, semantic::TerminalPolicy};

const DEFAULT_FONT_FAMILY: &str = "Arial";
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    render: RenderConfig,

    #[serde(default)]
    terminals: TerminalConfig,
}

impl AppConfig {
    pub fn new(render: RenderConfig, terminals: TerminalConfig) -> Self {
        Self { render, terminals }
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn terminals(&self) -> &TerminalConfig {
        &self.terminals
    }
}

/// Visual styling of rendered diagrams.
///
/// Colors are kept as strings and parsed when a renderer is built, so that a
/// bad value is reported together with its field name.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderConfig {
    /// Canvas fill. The canvas is transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Color of wires and symbol outlines.
    #[serde(default)]
    stroke_color: Option<String>,

    #[serde(default)]
    label_color: Option<String>,

    #[serde(default)]
    font_family: Option<String>,

    #[serde(default)]
    font_size: Option<f32>,
}

impl RenderConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color("background_color", self.background_color.as_deref())
    }

    /// Returns the stroke color, black when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn stroke_color(&self) -> Result<Color, String> {
        parse_color("stroke_color", self.stroke_color.as_deref()).map(Option::unwrap_or_default)
    }

    /// Returns the label color, black when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn label_color(&self) -> Result<Color, String> {
        parse_color("label_color", self.label_color.as_deref()).map(Option::unwrap_or_default)
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn font_size(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Sets the background color string.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Sets the stroke color string.
    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }
}

fn parse_color(field: &str, value: Option<&str>) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {field} in config: {err}"))
}

/// Terminal resolution settings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    policy: TerminalPolicy,
}

impl TerminalConfig {
    pub fn new(policy: TerminalPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TerminalPolicy {
        self.policy
    }
}
