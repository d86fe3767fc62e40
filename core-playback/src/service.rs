//! # Playback Service
//!
//! Thread-safe front door for the method channel. The host's channel handler
//! may run on any thread; the service serializes every call through a mutex so
//! the controller always sees one command at a time.
//!
//! ```ignore
//! use core_playback::{MethodCall, PlaybackService};
//! use std::sync::Arc;
//!
//! let service = PlaybackService::builder()
//!     .engine_factory(Arc::new(AndroidMediaPlayerFactory::new(jvm)))
//!     .build()?;
//!
//! let reply = service.handle(&MethodCall::new("isPlaying"));
//! ```

use crate::channel::{MethodCall, MethodResponse};
use crate::config::ChannelConfig;
use crate::controller::PlaybackController;
use crate::error::ErrorKind;
use bridge_traits::playback::EngineFactory;
use core_runtime::error::{Error, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PlaybackService {
    config: ChannelConfig,
    controller: Mutex<PlaybackController>,
}

impl PlaybackService {
    pub fn builder() -> PlaybackServiceBuilder {
        PlaybackServiceBuilder::default()
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Channel name the host should register this service under.
    pub fn channel(&self) -> &str {
        &self.config.channel
    }

    /// Handle one method call. Never panics on bad input; every failure is
    /// reported as a [`MethodResponse`].
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        let response = self.controller.lock().handle_call(call, &self.config);
        match &response {
            MethodResponse::Error { code, message } => {
                warn!(method = %call.method, code = %code, "{}", message)
            }
            MethodResponse::NotImplemented => {
                debug!(method = %call.method, "Method not implemented")
            }
            MethodResponse::Success { .. } => {}
        }
        response
    }

    /// Handle a JSON-encoded call such as `{"method": "play", "arguments": {...}}`.
    pub fn handle_json(&self, payload: &str) -> MethodResponse {
        match serde_json::from_str::<MethodCall>(payload) {
            Ok(call) => self.handle(&call),
            Err(err) => MethodResponse::Error {
                code: ErrorKind::InvalidArgument.code().to_string(),
                message: format!("Malformed method call: {}", err),
            },
        }
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut PlaybackController) -> R) -> R {
        f(&mut *self.controller.lock())
    }

    /// Release any live session. The service stays usable afterwards.
    pub fn shutdown(&self) {
        info!(channel = %self.config.channel, "Shutting down playback service");
        self.controller.lock().teardown();
    }
}

/// Builder for [`PlaybackService`].
#[derive(Default)]
pub struct PlaybackServiceBuilder {
    config: Option<ChannelConfig>,
    engine_factory: Option<Arc<dyn EngineFactory>>,
}

impl PlaybackServiceBuilder {
    pub fn config(mut self, config: ChannelConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn engine_factory(mut self, factory: Arc<dyn EngineFactory>) -> Self {
        self.engine_factory = Some(factory);
        self
    }

    /// Validate the configuration and assemble the service.
    ///
    /// Fails with [`Error::CapabilityMissing`] when no engine factory was
    /// supplied; the core cannot play anything without one.
    pub fn build(self) -> Result<PlaybackService> {
        let factory = self
            .engine_factory
            .ok_or_else(|| Error::CapabilityMissing {
                capability: "EngineFactory".to_string(),
                message: "No playback engine factory provided. \
                          Android: wrap android.media.MediaPlayer. \
                          Tests: inject a fake engine."
                    .to_string(),
            })?;

        let config = self.config.unwrap_or_default();
        config.validate()?;

        info!(channel = %config.channel, "Playback service ready");
        Ok(PlaybackService {
            config,
            controller: Mutex::new(PlaybackController::new(factory)),
        })
    }
}
