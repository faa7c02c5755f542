//! Progress notification port
//!
//! Lets the presentation layer show a loading state while a provider call is
//! outstanding.

use duochat_domain::Provider;

/// Callback for provider request progress
pub trait ReplyProgress: Send + Sync {
    /// Called right before the provider call is made
    fn on_request_start(&self, provider: Provider);

    /// Called when the call resolves, successfully or not
    fn on_request_complete(&self, provider: Provider, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ReplyProgress for NoProgress {
    fn on_request_start(&self, _provider: Provider) {}
    fn on_request_complete(&self, _provider: Provider, _success: bool) {}
}
