//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the pipeline and an external
//! system (the remote instance API, wall-clock pacing, the filesystem).
//! Implementations live in `src/adapters/`.

pub mod api;
pub mod filesystem;
pub mod pacer;

pub use api::{ApiFuture, RemoteApi};
pub use filesystem::FileSystem;
pub use pacer::{PauseFuture, Pacer};
