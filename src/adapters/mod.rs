//! Adapter implementations of the port traits.
//!
//! - `live`: talks to the real instance, disk, and timer.
//! - `recording`: wraps live adapters and captures interactions to a cassette.
//! - `replaying`: serves previously captured interactions.

pub mod live;
pub mod recording;
pub mod replaying;
