//! `[output]` section

use duochat_domain::OutputFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Reply format when no `--raw` / `--json` flag is given
    pub format: Option<OutputFormat>,
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Whether to emit ANSI colors. A set `NO_COLOR` variable wins over the file.
    pub fn color_enabled(&self) -> bool {
        self.color_enabled_with(|name| std::env::var_os(name).is_some())
    }

    fn color_enabled_with(&self, is_set: impl Fn(&str) -> bool) -> bool {
        self.color && !is_set("NO_COLOR")
    }
}
