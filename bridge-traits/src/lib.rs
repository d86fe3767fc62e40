//! # Host Bridge Traits
//!
//! Capabilities the host platform must supply to the playback core.
//!
//! ## Overview
//!
//! The core owns the playback state machine; the host owns the native media
//! player and the log pipeline. This crate is the contract between the two:
//!
//! - [`PlaybackEngine`](playback::PlaybackEngine) - One native player instance
//!   (`MediaPlayer` on Android, `AVAudioPlayer` on iOS)
//! - [`EngineFactory`](playback::EngineFactory) - Creates a fresh engine for
//!   every playback session
//! - [`LoggerSink`](logging::LoggerSink) - Mirrors core logs into Logcat /
//!   `os_log`
//!
//! ## Error Handling
//!
//! Adapters convert platform exceptions and status codes into
//! [`BridgeError`](error::BridgeError). The core never sees raw platform
//! failures.
//!
//! ## Thread Safety
//!
//! Engines are `Send` so a session can move onto the worker that serializes
//! commands; factories and sinks are `Send + Sync`. On `wasm32` the bounds are
//! relaxed, see [`platform`].
//!
//! ## Example
//!
//! ```ignore
//! use bridge_traits::error::Result;
//! use bridge_traits::playback::PlaybackEngine;
//!
//! struct AndroidMediaPlayer { /* JNI handle */ }
//!
//! impl PlaybackEngine for AndroidMediaPlayer {
//!     fn load(&mut self, path: &str) -> Result<()> {
//!         // MediaPlayer.setDataSource(path)
//!         todo!()
//!     }
//!     // ...
//! }
//! ```

pub mod error;
pub mod logging;
pub mod platform;
pub mod playback;

pub use error::BridgeError;

pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use playback::{EngineFactory, PlaybackEngine, SessionId};
