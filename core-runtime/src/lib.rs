//! # Core Runtime Module
//!
//! Ambient runtime infrastructure shared by the playback crates:
//! - Logging and tracing setup
//! - Host log forwarding through [`LoggerSink`](bridge_traits::LoggerSink)
//! - The runtime error type used by configuration and initialization paths

pub mod error;
pub mod logging;

pub use error::{Error, Result};
