//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::Provider`]: the two interchangeable chat backends
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
pub mod string;
