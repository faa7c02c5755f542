//! Application-level configuration.
//!
//! - [`ChatBehavior`]: defaults applied by the chat use cases

pub mod behavior;

pub use behavior::ChatBehavior;
