//! # Playback Controller
//!
//! Owns at most one playback session and drives the host engine through it.
//!
//! ## Session lifecycle
//!
//! ```text
//!            play(path)                 pause()
//!   Idle ───────────────► Loading ──► Playing ◄──────► Paused
//!    ▲                       │          ▲   resume()     │
//!    │                       ▼          └────────────────┘
//!    │                    Failed
//!    │        stop() / play(other) / teardown
//!    └──────────────────────────────────────── (any state)
//! ```
//!
//! A new engine is requested from the [`EngineFactory`] for every `play`. Any
//! previous session is stopped and released first; failures while tearing the
//! old session down are logged and never block the new one.
//!
//! The controller is not internally synchronized. Callers serialize commands,
//! either on a single event loop or through
//! [`PlaybackService`](crate::service::PlaybackService).

use crate::error::{EngineStage, PlaybackError, Result};
use crate::state::PlaybackState;
use bridge_traits::error::BridgeError;
use bridge_traits::playback::{EngineFactory, PlaybackEngine, SessionId};
use core_runtime::logging::strip_path;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn};

struct Session {
    id: SessionId,
    source_path: String,
    state: PlaybackState,
    /// `None` once the session has failed.
    engine: Option<Box<dyn PlaybackEngine>>,
}

pub struct PlaybackController {
    factory: Arc<dyn EngineFactory>,
    session: Option<Session>,
}

impl PlaybackController {
    pub fn new(factory: Arc<dyn EngineFactory>) -> Self {
        Self {
            factory,
            session: None,
        }
    }

    /// Start playing `path`, replacing any current session.
    ///
    /// The engine is loaded, prepared and started before this returns. On
    /// failure the engine is released, the controller moves to
    /// [`PlaybackState::Failed`] and [`PlaybackError::SessionFailed`] names
    /// the stage that broke. An empty path is rejected without touching the
    /// current session.
    pub fn play(&mut self, path: &str) -> Result<()> {
        if path.trim().is_empty() {
            return Err(PlaybackError::InvalidArgument(
                "path must not be empty".to_string(),
            ));
        }

        self.release_session("replaced");

        let id = SessionId::new();
        let span = info_span!("play", session_id = %id, file = strip_path(path));
        let _entered = span.enter();

        let mut session = Session {
            id,
            source_path: path.to_string(),
            state: PlaybackState::Loading,
            engine: None,
        };
        debug!(state = %session.state, "Preparing engine");

        let outcome = self.start_engine(path);
        let result = match outcome {
            Ok(engine) => {
                session.engine = Some(engine);
                session.state = PlaybackState::Playing;
                info!("Playback started");
                Ok(())
            }
            Err(err) => {
                session.state = PlaybackState::Failed;
                error!(error = %err, "Playback failed");
                Err(err)
            }
        };

        self.session = Some(session);
        result
    }

    /// Pause the current session. Does nothing unless it is playing.
    pub fn pause(&mut self) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.state != PlaybackState::Playing {
            return Ok(());
        }
        let Some(engine) = session.engine.as_mut() else {
            return Ok(());
        };

        engine
            .pause()
            .map_err(|e| PlaybackError::engine("pause", e))?;
        session.state = PlaybackState::Paused;
        debug!(session_id = %session.id, "Playback paused");
        Ok(())
    }

    /// Restart output on the current session, whatever its state.
    pub fn resume(&mut self) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let Some(engine) = session.engine.as_mut() else {
            return Ok(());
        };

        engine
            .start()
            .map_err(|e| PlaybackError::engine("resume", e))?;
        session.state = PlaybackState::Playing;
        debug!(session_id = %session.id, "Playback resumed");
        Ok(())
    }

    /// Stop and release the current session. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.release_session("stopped");
    }

    /// Forward a seek to the engine. The position is passed through untouched;
    /// range handling belongs to the platform player.
    pub fn seek(&mut self, position_ms: i64) -> Result<()> {
        let Some((id, engine)) = self.engine_mut() else {
            return Ok(());
        };

        engine
            .seek(position_ms)
            .map_err(|e| PlaybackError::engine("seek", e))?;
        debug!(session_id = %id, position_ms, "Seek requested");
        Ok(())
    }

    /// Duration of the current source in milliseconds, 0 without an engine.
    pub fn duration_ms(&self) -> Result<i64> {
        match self.engine() {
            Some(engine) => engine
                .duration_ms()
                .map_err(|e| PlaybackError::engine("getDuration", e)),
            None => Ok(0),
        }
    }

    /// Playback position in milliseconds, 0 without an engine.
    pub fn position_ms(&self) -> Result<i64> {
        match self.engine() {
            Some(engine) => engine
                .position_ms()
                .map_err(|e| PlaybackError::engine("getPosition", e)),
            None => Ok(0),
        }
    }

    pub fn is_playing(&self) -> Result<bool> {
        match self.engine() {
            Some(engine) => engine
                .is_playing()
                .map_err(|e| PlaybackError::engine("isPlaying", e)),
            None => Ok(false),
        }
    }

    /// Release everything. Called from `Drop` as well.
    pub fn teardown(&mut self) {
        self.release_session("teardown");
    }

    pub fn state(&self) -> PlaybackState {
        self.session
            .as_ref()
            .map(|s| s.state)
            .unwrap_or(PlaybackState::Idle)
    }

    pub fn source_path(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.source_path.as_str())
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn has_engine(&self) -> bool {
        self.engine().is_some()
    }

    fn engine(&self) -> Option<&dyn PlaybackEngine> {
        self.session.as_ref()?.engine.as_deref()
    }

    fn engine_mut(&mut self) -> Option<(SessionId, &mut (dyn PlaybackEngine + 'static))> {
        let session = self.session.as_mut()?;
        let engine = session.engine.as_deref_mut()?;
        Some((session.id, engine))
    }

    fn start_engine(&self, path: &str) -> Result<Box<dyn PlaybackEngine>> {
        let mut engine = self
            .factory
            .create()
            .map_err(session_failed(path, EngineStage::Create))?;

        if let Err(err) = bring_up(engine.as_mut(), path) {
            if let Err(release_err) = engine.release() {
                warn!(error = %release_err, "Failed to release engine after setup error");
            }
            return Err(err);
        }

        Ok(engine)
    }

    fn release_session(&mut self, reason: &'static str) {
        let Some(session) = self.session.take() else {
            return;
        };
        let Some(mut engine) = session.engine else {
            debug!(session_id = %session.id, reason, "Cleared failed session");
            return;
        };

        if let Err(err) = engine.stop() {
            warn!(session_id = %session.id, error = %err, "Engine stop failed");
        }
        if let Err(err) = engine.release() {
            warn!(session_id = %session.id, error = %err, "Engine release failed");
        }

        info!(
            session_id = %session.id,
            file = strip_path(&session.source_path),
            reason,
            "Playback session released"
        );
    }
}

fn bring_up(engine: &mut dyn PlaybackEngine, path: &str) -> Result<()> {
    engine
        .load(path)
        .map_err(session_failed(path, EngineStage::Load))?;
    engine
        .prepare()
        .map_err(session_failed(path, EngineStage::Prepare))?;
    engine
        .start()
        .map_err(session_failed(path, EngineStage::Start))
}

fn session_failed(path: &str, stage: EngineStage) -> impl FnOnce(BridgeError) -> PlaybackError + '_ {
    move |source| PlaybackError::SessionFailed {
        path: path.to_string(),
        stage,
        source,
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state())
            .field("session_id", &self.session_id())
            .field("source_path", &self.source_path())
            .field("has_engine", &self.has_engine())
            .finish()
    }
}
