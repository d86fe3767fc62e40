//! # Method Channel Protocol
//!
//! Decoding of UI-layer method calls into [`Command`]s and encoding of their
//! results. The transport that delivers calls is owned by the host; this
//! module only sees the already-deserialized call.
//!
//! | Method        | Arguments              | Result          |
//! |---------------|------------------------|-----------------|
//! | `play`        | `path: string`         | `null`          |
//! | `pause`       |                        | `null`          |
//! | `resume`      |                        | `null`          |
//! | `stop`        |                        | `null`          |
//! | `getDuration` |                        | integer (ms)    |
//! | `getPosition` |                        | integer (ms)    |
//! | `seek`        | `position: integer`    | `null`          |
//! | `isPlaying`   |                        | boolean         |
//!
//! Argument keys are configurable through [`ChannelConfig`]. A `seek` without a
//! position seeks to 0.

use crate::config::ChannelConfig;
use crate::controller::PlaybackController;
use crate::error::{ErrorKind, PlaybackError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A single call as delivered by the host's method channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    /// Argument map, or `null` for argument-less calls.
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }

    pub fn with_arguments(mut self, arguments: Value) -> Self {
        self.arguments = arguments;
        self
    }

    fn argument(&self, key: &str) -> Result<Option<&Value>> {
        match &self.arguments {
            Value::Null => Ok(None),
            Value::Object(map) => Ok(map.get(key).filter(|v| !v.is_null())),
            other => Err(PlaybackError::InvalidArgument(format!(
                "arguments of '{}' must be a map, got {}",
                self.method, other
            ))),
        }
    }
}

/// Reply sent back over the method channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success { result: Value },
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    pub fn success(result: Value) -> Self {
        MethodResponse::Success { result }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success { .. })
    }

    /// Error code for failed calls, `None` otherwise.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            MethodResponse::Error { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<Result<Value>> for MethodResponse {
    fn from(result: Result<Value>) -> Self {
        match result {
            Ok(value) => MethodResponse::Success { result: value },
            Err(err) => match err.kind() {
                ErrorKind::NotImplemented => MethodResponse::NotImplemented,
                kind => MethodResponse::Error {
                    code: kind.code().to_string(),
                    message: err.to_string(),
                },
            },
        }
    }
}

/// Typed playback command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play { path: String },
    Pause,
    Resume,
    Stop,
    GetDuration,
    GetPosition,
    Seek { position_ms: i64 },
    IsPlaying,
}

impl Command {
    /// Decode a method call using the argument keys from `config`.
    pub fn decode(call: &MethodCall, config: &ChannelConfig) -> Result<Self> {
        let command = match call.method.as_str() {
            "play" => Command::Play {
                path: decode_path(call, &config.path_argument)?,
            },
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "stop" => Command::Stop,
            "getDuration" => Command::GetDuration,
            "getPosition" => Command::GetPosition,
            "seek" => Command::Seek {
                position_ms: decode_position(call, &config.position_argument)?,
            },
            "isPlaying" => Command::IsPlaying,
            other => return Err(PlaybackError::NotImplemented(other.to_string())),
        };
        Ok(command)
    }

    pub fn method_name(&self) -> &'static str {
        match self {
            Command::Play { .. } => "play",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Stop => "stop",
            Command::GetDuration => "getDuration",
            Command::GetPosition => "getPosition",
            Command::Seek { .. } => "seek",
            Command::IsPlaying => "isPlaying",
        }
    }
}

fn decode_path(call: &MethodCall, key: &str) -> Result<String> {
    match call.argument(key)? {
        Some(Value::String(path)) if !path.trim().is_empty() => Ok(path.clone()),
        Some(Value::String(_)) => Err(PlaybackError::InvalidArgument(format!(
            "'{}' must not be empty",
            key
        ))),
        Some(other) => Err(PlaybackError::InvalidArgument(format!(
            "'{}' must be a string, got {}",
            key, other
        ))),
        None => Err(PlaybackError::InvalidArgument(format!(
            "missing required argument '{}'",
            key
        ))),
    }
}

fn decode_position(call: &MethodCall, key: &str) -> Result<i64> {
    match call.argument(key)? {
        None => Ok(0),
        Some(value) => value.as_i64().ok_or_else(|| {
            PlaybackError::InvalidArgument(format!("'{}' must be an integer, got {}", key, value))
        }),
    }
}

impl PlaybackController {
    /// Run a decoded command and encode its result for the channel.
    pub fn execute(&mut self, command: Command) -> Result<Value> {
        debug!(method = command.method_name(), "Executing command");
        match command {
            Command::Play { path } => self.play(&path).map(|()| Value::Null),
            Command::Pause => self.pause().map(|()| Value::Null),
            Command::Resume => self.resume().map(|()| Value::Null),
            Command::Stop => {
                self.stop();
                Ok(Value::Null)
            }
            Command::GetDuration => self.duration_ms().map(Value::from),
            Command::GetPosition => self.position_ms().map(Value::from),
            Command::Seek { position_ms } => self.seek(position_ms).map(|()| Value::Null),
            Command::IsPlaying => self.is_playing().map(Value::from),
        }
    }

    /// Decode, run and encode a single method call.
    pub fn handle_call(&mut self, call: &MethodCall, config: &ChannelConfig) -> MethodResponse {
        Command::decode(call, config)
            .and_then(|command| self.execute(command))
            .into()
    }
}
