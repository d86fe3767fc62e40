//! # Channel Configuration
//!
//! Names used on the method channel between the UI layer and the playback
//! core. The defaults match the Flutter host's `MethodChannel` setup.

use core_runtime::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default channel name registered by the host.
pub const DEFAULT_CHANNEL: &str = "com.example.modern_music_player/midi";

/// Method channel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Name the host registers the channel under.
    ///
    /// Default: `com.example.modern_music_player/midi`.
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Argument key holding the source path of a `play` call.
    ///
    /// Default: `path`.
    #[serde(default = "default_path_argument")]
    pub path_argument: String,

    /// Argument key holding the target position of a `seek` call.
    ///
    /// Default: `position`.
    #[serde(default = "default_position_argument")]
    pub position_argument: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            path_argument: default_path_argument(),
            position_argument: default_position_argument(),
        }
    }
}

impl ChannelConfig {
    /// Parse a JSON document, filling missing fields with defaults, and
    /// validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid channel config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.channel.trim().is_empty() {
            return Err(Error::Config("channel must not be empty".to_string()));
        }

        if self.path_argument.is_empty() {
            return Err(Error::Config("path_argument must not be empty".to_string()));
        }

        if self.position_argument.is_empty() {
            return Err(Error::Config(
                "position_argument must not be empty".to_string(),
            ));
        }

        if self.path_argument == self.position_argument {
            return Err(Error::Config(format!(
                "path_argument and position_argument must differ (both '{}')",
                self.path_argument
            )));
        }

        Ok(())
    }
}

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

fn default_path_argument() -> String {
    "path".to_string()
}

fn default_position_argument() -> String {
    "position".to_string()
}
