//! Inbound response formatting.
//!
//! - [`segment::ContentSegment`]: typed renderable blocks
//! - [`parser::format`]: raw text → ordered segments

pub mod parser;
pub mod segment;

pub use parser::format;
pub use segment::{ContentSegment, DEFAULT_CODE_LANGUAGE};
