//! Loading indicators for provider requests

use duochat_application::ReplyProgress;
use duochat_domain::Provider;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while the provider is thinking.
///
/// Cleared when the request completes so the reply starts on a clean line.
pub struct ThinkingSpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl ThinkingSpinner {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub(crate) fn message(provider: Provider) -> String {
        format!("{} is thinking...", provider.display_name())
    }
}

impl Default for ThinkingSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyProgress for ThinkingSpinner {
    fn on_request_start(&self, provider: Provider) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style());
        pb.set_message(Self::message(provider));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.bar.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_request_complete(&self, _provider: Provider, _success: bool) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_message() {
        assert_eq!(
            ThinkingSpinner::message(Provider::DeepSeek),
            "DeepSeek AI is thinking..."
        );
    }

    #[test]
    fn test_spinner_clears_on_complete() {
        let spinner = ThinkingSpinner::new();
        spinner.on_request_start(Provider::Gemini);
        assert!(spinner.bar.lock().unwrap().is_some());

        spinner.on_request_complete(Provider::Gemini, true);
        assert!(spinner.bar.lock().unwrap().is_none());

        // completing twice is harmless
        spinner.on_request_complete(Provider::Gemini, false);
    }
}
