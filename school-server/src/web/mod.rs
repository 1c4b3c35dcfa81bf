//! Web layer for the school server.
//!
//! Provides JSON endpoints for school search, meals and timetables.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
