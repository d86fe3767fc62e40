//! # Playback Control Module
//!
//! Turns method-channel calls from the UI layer into calls on a host playback
//! engine.
//!
//! ## Overview
//!
//! - [`PlaybackController`] - Single-session state machine over a
//!   [`PlaybackEngine`](bridge_traits::PlaybackEngine)
//! - [`Command`], [`MethodCall`], [`MethodResponse`] - Method channel protocol
//! - [`PlaybackService`] - Mutex-guarded handle for multi-threaded hosts
//! - [`ChannelConfig`] - Channel name and argument keys

pub mod channel;
pub mod config;
pub mod controller;
pub mod error;
pub mod service;
pub mod state;

pub use channel::{Command, MethodCall, MethodResponse};
pub use config::ChannelConfig;
pub use controller::PlaybackController;
pub use error::{EngineStage, ErrorKind, PlaybackError, Result};
pub use service::{PlaybackService, PlaybackServiceBuilder};
pub use state::PlaybackState;
