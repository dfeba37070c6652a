//! Server crate for the GameRecs recommendation engine.
//!
//! Serves the minimal web front end: an HTML form (user dropdown + count),
//! a results page, and a JSON API, all over state loaded once at startup.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{AppError, AppResult};
pub use routes::create_router;
pub use state::AppState;
