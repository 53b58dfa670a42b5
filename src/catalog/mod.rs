//! Mock catalog service, the upstream the albums service calls.
//!
//! # Data Flow
//! ```text
//! GET /albums[?error=remote401|remoteLatency]
//!     → handlers.rs check_auth (401, or a random delay)
//!     → model.rs AlbumTable (in-memory, seeded)
//!     → JSON list ordered by id
//! ```
//!
//! Any path without a route, `/junk` included, answers 404.

pub mod handlers;
pub mod model;
pub mod server;

pub use model::{Album, AlbumTable};
pub use server::{CatalogServer, CatalogServiceConfig, CatalogState};
