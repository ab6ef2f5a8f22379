//! Domain layer for contributor triage
//!
//! This module contains the data model, the decision types and the port
//! through which the engine reaches GitHub.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{TriageError, TriageResult};
