//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod generate_reply;
pub mod manage_chats;
pub mod send_message;
pub(crate) mod shared;
#[cfg(test)]
pub(crate) mod test_support;

pub use shared::ChatError;
