//! Provider instruction texts.
//!
//! - [`style`]: the style contract each provider is primed with

pub mod style;

pub use style::{
    GEMINI_GREETING, GEMINI_STYLE_ACKNOWLEDGEMENT, REASONING_SYSTEM_INSTRUCTION, THINK_CLOSE,
    THINK_OPEN,
};
