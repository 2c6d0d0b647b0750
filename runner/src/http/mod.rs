//! Controller REST API client

pub mod auth;
pub mod client;
pub mod controller;
pub mod deployments;
pub mod devices;
pub mod templates;
