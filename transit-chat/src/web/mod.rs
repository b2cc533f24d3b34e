//! Web layer for the transit chat service.
//!
//! Exposes the chat endpoint and the underlying rail and bus queries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
