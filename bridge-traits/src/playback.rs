//! Playback bridge traits.
//!
//! The core playback controller never talks to a native media player directly.
//! Hosts hand it an [`EngineFactory`] and the controller asks that factory for a
//! fresh [`PlaybackEngine`] every time a new source is played. The engine
//! mirrors the primitive lifecycle shared by the platform players we target
//! (`MediaPlayer` on Android, `AVAudioPlayer` on iOS, desktop shims):
//!
//! ```text
//! load(path) -> prepare() -> start() <-> pause()
//!                               |
//!                          stop() -> release()
//! ```
//!
//! All calls are synchronous. `prepare()` may block while the source is opened
//! and buffered; hosts that care should dispatch playback commands to a worker.

use crate::{error::Result, platform::PlatformSend, platform::PlatformSendSync};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a playback session owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a new session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct an identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single native playback object bound to at most one source.
///
/// Implementations wrap the platform player. Every primitive may fail with a
/// platform-defined error, which the adapter converts into a
/// [`BridgeError`](crate::error::BridgeError). Positions and durations are in
/// milliseconds.
pub trait PlaybackEngine: PlatformSend {
    /// Bind the engine to a source path.
    fn load(&mut self, path: &str) -> Result<()>;

    /// Open and buffer the bound source. May block on I/O.
    fn prepare(&mut self) -> Result<()>;

    /// Start or resume output.
    fn start(&mut self) -> Result<()>;

    /// Pause output, keeping the current position.
    fn pause(&mut self) -> Result<()>;

    /// Stop output.
    fn stop(&mut self) -> Result<()>;

    /// Free native resources. The engine is not used again afterwards.
    fn release(&mut self) -> Result<()>;

    /// Seek to an absolute position. Range handling is up to the platform.
    fn seek(&mut self, position_ms: i64) -> Result<()>;

    /// Total duration of the bound source.
    fn duration_ms(&self) -> Result<i64>;

    /// Current playback position.
    fn position_ms(&self) -> Result<i64>;

    /// Whether the engine is currently producing output.
    fn is_playing(&self) -> Result<bool>;
}

/// Creates engines on demand, one per playback session.
pub trait EngineFactory: PlatformSendSync {
    fn create(&self) -> Result<Box<dyn PlaybackEngine>>;
}

impl<F> EngineFactory for F
where
    F: Fn() -> Result<Box<dyn PlaybackEngine>> + PlatformSendSync,
{
    fn create(&self) -> Result<Box<dyn PlaybackEngine>> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;

    struct SilentEngine;

    impl PlaybackEngine for SilentEngine {
        fn load(&mut self, _path: &str) -> Result<()> {
            Ok(())
        }
        fn prepare(&mut self) -> Result<()> {
            Ok(())
        }
        fn start(&mut self) -> Result<()> {
            Ok(())
        }
        fn pause(&mut self) -> Result<()> {
            Ok(())
        }
        fn stop(&mut self) -> Result<()> {
            Ok(())
        }
        fn release(&mut self) -> Result<()> {
            Ok(())
        }
        fn seek(&mut self, _position_ms: i64) -> Result<()> {
            Ok(())
        }
        fn duration_ms(&self) -> Result<i64> {
            Ok(1234)
        }
        fn position_ms(&self) -> Result<i64> {
            Ok(0)
        }
        fn is_playing(&self) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn session_id_is_unique() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
        assert_eq!(a, SessionId::from_uuid(*a.as_uuid()));
        assert_eq!(a.to_string(), a.as_uuid().to_string());
    }

    #[test]
    fn closures_act_as_factories() {
        let factory = || -> Result<Box<dyn PlaybackEngine>> { Ok(Box::new(SilentEngine)) };
        let engine = factory.create().unwrap();
        assert_eq!(engine.duration_ms().unwrap(), 1234);
    }

    #[test]
    fn failing_factory_surfaces_bridge_error() {
        let factory = || -> Result<Box<dyn PlaybackEngine>> {
            Err(BridgeError::NotAvailable("no audio device".into()))
        };
        let err = factory.create().err().unwrap();
        assert!(matches!(err, BridgeError::NotAvailable(_)));
    }
}
