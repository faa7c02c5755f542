//! Outbound request shaping.
//!
//! Turns a uniform conversation into the message layout a specific provider
//! accepts. Pure logic: encoding and network calls live in the
//! infrastructure transports.

pub mod builder;
pub mod request;

pub use builder::build_request;
pub use request::{
    InstructedRequest, InstructedRole, InstructedTurn, ProviderRequest, ReasoningMessage,
    ReasoningRequest,
};
