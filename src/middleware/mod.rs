//! HTTP middleware shared across all routes.

pub mod logging;

pub use logging::request_logging;
