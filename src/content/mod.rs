//! Portfolio content: projects and skills with public reads and
//! admin-only mutations.

pub mod api;
pub mod models;
pub mod store;

pub use api::ContentState;
pub use store::ContentStore;
