//! HTTP request surface.
//!
//! - `POST /match-subscribers` - match a signal and forward the result
//! - `GET /health` - liveness probe

pub mod dto;
mod error;
mod handlers;
mod router;

pub use error::ApiError;
pub use router::{create_router, AppState};
