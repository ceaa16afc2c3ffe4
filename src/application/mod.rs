//! Application layer: services and use cases
//!
//! This layer resolves vampire names and orchestrates domain queries.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
