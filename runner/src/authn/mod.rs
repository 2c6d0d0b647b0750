//! Controller authentication

pub mod credentials;
pub mod session;
