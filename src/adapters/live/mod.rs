//! Live adapters for real external interactions.

pub mod api;
pub mod filesystem;
pub mod pacer;
