//! Template Runner Library
//!
//! Pushes configuration templates to network devices through a network
//! controller's REST API: authenticate, resolve names to identifiers,
//! preview or deploy, and poll the deployment to completion.

pub mod app;
pub mod authn;
pub mod cli;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod input;
pub mod logs;
pub mod output;
pub mod resolve;
pub mod settings;
pub mod utils;
