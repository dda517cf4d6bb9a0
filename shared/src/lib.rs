//! Shared types for the restaurant site
//!
//! Record models, the record id generator and validation errors used by
//! the server crate and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::ValidationError;
pub use models::{MenuItem, Order, Record, Reservation};
pub use serde::{Deserialize, Serialize};
