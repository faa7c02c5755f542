//! Progress display while a provider call is outstanding

pub mod reporter;

pub use reporter::ThinkingSpinner;
