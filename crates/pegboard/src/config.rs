//! Configuration types for Pegboard.
//!
//! All types implement [`serde::Deserialize`] and every section is optional,
//! so an empty document yields the defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining limits and output settings.
//! - [`LimitsConfig`] - Recursion and input-size bounds applied to compiled grammars.
//! - [`OutputConfig`] - How parse trees are rendered.
//!
//! ```toml
//! [limits]
//! max_depth = 512
//! max_input_len = 1048576
//!
//! [output]
//! format = "debug"
//! ```
//!
//! # Example
//!
//! ```
//! # use pegboard::config::{AppConfig, OutputFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.limits().max_depth(), 256);
//! assert_eq!(config.output().format(), OutputFormat::Tree);
//! ```

use serde::Deserialize;

use pegboard_core::Limits;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Limits section.
    #[serde(default)]
    limits: LimitsConfig,

    /// Output section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(limits: LimitsConfig, output: OutputConfig) -> Self {
        Self { limits, output }
    }

    /// Returns the limits configuration.
    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Bounds applied to every grammar compiled under this configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum nesting of rule references in a single parse.
    max_depth: usize,

    /// Longest input, in characters, a parse will accept.
    max_input_len: Option<usize>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: Limits::DEFAULT_MAX_DEPTH,
            max_input_len: None,
        }
    }
}

impl LimitsConfig {
    /// Creates a new [`LimitsConfig`].
    ///
    /// # Arguments
    ///
    /// * `max_depth` - Maximum nesting of rule references.
    /// * `max_input_len` - Optional cap on the input length in characters.
    pub fn new(max_depth: usize, max_input_len: Option<usize>) -> Self {
        Self {
            max_depth,
            max_input_len,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn max_input_len(&self) -> Option<usize> {
        self.max_input_len
    }

    /// Returns the engine [`Limits`] these settings describe.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_depth` is zero, which would reject every
    /// rule reference.
    pub fn to_limits(&self) -> Result<Limits, String> {
        if self.max_depth == 0 {
            return Err("limits.max_depth must be at least 1".to_string());
        }
        Ok(Limits::new(self.max_depth, self.max_input_len))
    }
}

/// Parse tree rendering configuration.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct OutputConfig {
    /// Rendering style for parse trees.
    #[serde(default)]
    format: OutputFormat,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// How [`render_nodes`](crate::render_nodes) lays out a parse tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One node per line, indented by depth.
    #[default]
    Tree,
    /// The compact `tag("raw" child)` form, one top-level node per line.
    Debug,
}
