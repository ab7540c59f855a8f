//! Output format specifications for CLI results.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a command renders its result on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Compact JSON, one document per invocation.
    Json,
    /// Pretty-printed JSON.
    JsonPretty,
    /// Aligned plain-text tables for humans.
    Table,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Table
    }
}

impl OutputFormat {
    /// Whether this format is machine-readable JSON.
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonPretty)
    }
}
