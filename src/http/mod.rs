//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, connect info, trace layer)
//!     → request.rs (error mode, client key)
//!     → handlers.rs (bookkeeping, dispatch to catalog)
//!     → response.rs (relay upstream, map errors to status)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::ErrorMode;
pub use response::AlbumsError;
pub use server::{AppState, HttpServer};
