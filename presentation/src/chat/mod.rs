//! Interactive chat module
//!
//! A readline-based session over the stored chats.

pub mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ChatRepl;
