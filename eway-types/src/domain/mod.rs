//! Domain models for the shared page gateway.

pub mod amount;
pub mod customer;
pub mod environment;

pub use amount::Amount;
pub use customer::CustomerTitle;
pub use environment::{Environment, RequestMethod};
