//! Output format value object

use serde::{Deserialize, Serialize};

/// How a provider reply is written to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Formatted segments with colors (default)
    #[default]
    Rendered,
    /// Reply text exactly as stored
    Raw,
    /// Segments as JSON
    Json,
}
