//! # eWAY Types
//!
//! Domain types for the eWAY shared page checkout flow. This crate has no
//! IO dependencies: only validation, request assembly, wire payloads and
//! the gateway's response code table.
//!
//! ## Layout
//!
//! - `domain/` - Amounts, customer titles, environments, request methods
//! - `builder` - Validating request builder
//! - `dto` - Request and response payloads
//! - `response_codes` - Static response code descriptions
//! - `error` - Validation errors

pub mod builder;
pub mod domain;
pub mod dto;
pub mod error;
pub mod response_codes;

// Re-export commonly used types
pub use builder::RequestBuilder;
pub use domain::{Amount, CustomerTitle, Environment, RequestMethod};
pub use dto::*;
pub use error::{Field, ValidationError};
pub use response_codes::{ResolvedCode, ResponseCodeTable, ResponseFamily};
