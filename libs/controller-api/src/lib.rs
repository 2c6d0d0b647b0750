//! Wire models for the network controller REST API.
//!
//! Field names follow the controller's camelCase JSON; everything here is
//! plain data with no I/O.

pub mod models;

pub use models::*;
