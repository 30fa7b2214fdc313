// HTTP surface: routers, handlers and error responses

pub mod auth;
pub mod error;
pub mod exercises;
pub mod health;
pub mod members;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use routes::create_routes;
pub use state::AppState;
