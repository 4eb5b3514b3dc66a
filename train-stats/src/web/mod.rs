//! Web layer for the train stats site.
//!
//! Pages are rendered on the server. A year page's table states travel in
//! its query string, so every header link is a plain GET.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
