//! Portfolio backend library.
//!
//! Exposes core modules for use by the server binary and tests.

pub mod auth;
pub mod contact;
pub mod content;
pub mod middleware;
pub mod models;
pub mod routes;
