//! Workspace facade crate.
//!
//! Host applications depend on `midi-channel-workspace` and pick features
//! instead of wiring each crate individually:
//!
//! - `playback` (default) - [`core_playback`], the controller and method channel
//! - `logging` (default) - [`core_runtime`], subscriber setup and host log forwarding
//!
//! [`bridge_traits`] is always available; every host has to implement it.

pub use bridge_traits;

#[cfg(feature = "playback")]
pub use core_playback;

#[cfg(feature = "logging")]
pub use core_runtime;
