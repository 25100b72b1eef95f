//! Local stand-in for the walking-directions service
//!
//! Answers with a straight-line route between origin and destination, encoded
//! the same way the real service encodes geometry. Used for development and
//! end-to-end tests.

pub mod models;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
