//! HTTP surface of the marketplace backend.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routing table)
//!     → domain handlers (products, chat)
//!     → response.rs (uniform envelope)
//!     → Send to client
//! ```

pub mod error;
pub mod response;
pub mod server;

pub use error::AppError;
pub use response::{ApiResponse, PagedResponse};
pub use server::{AppState, HttpServer};
