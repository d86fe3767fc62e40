//! # Method Channel Demo
//!
//! Feeds a scripted sequence of method calls through [`PlaybackService`] using
//! a simulated engine whose clock advances 250 ms per query.
//!
//! Run with: `cargo run --example playback_demo --package core-playback`

use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::logging::{ConsoleLogger, LogLevel};
use bridge_traits::playback::{EngineFactory, PlaybackEngine};
use core_playback::PlaybackService;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

struct SimulatedEngine {
    duration_ms: i64,
    position_ms: AtomicI64,
    playing: bool,
}

impl PlaybackEngine for SimulatedEngine {
    fn load(&mut self, path: &str) -> BridgeResult<()> {
        if !path.ends_with(".mid") {
            return Err(BridgeError::Source(format!("unsupported source: {}", path)));
        }
        Ok(())
    }

    fn prepare(&mut self) -> BridgeResult<()> {
        Ok(())
    }

    fn start(&mut self) -> BridgeResult<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> BridgeResult<()> {
        self.playing = false;
        Ok(())
    }

    fn stop(&mut self) -> BridgeResult<()> {
        self.playing = false;
        Ok(())
    }

    fn release(&mut self) -> BridgeResult<()> {
        Ok(())
    }

    fn seek(&mut self, position_ms: i64) -> BridgeResult<()> {
        self.position_ms
            .store(position_ms.clamp(0, self.duration_ms), Ordering::Relaxed);
        Ok(())
    }

    fn duration_ms(&self) -> BridgeResult<i64> {
        Ok(self.duration_ms)
    }

    fn position_ms(&self) -> BridgeResult<i64> {
        if !self.playing {
            return Ok(self.position_ms.load(Ordering::Relaxed));
        }
        let next = (self.position_ms.load(Ordering::Relaxed) + 250).min(self.duration_ms);
        self.position_ms.store(next, Ordering::Relaxed);
        Ok(next)
    }

    fn is_playing(&self) -> BridgeResult<bool> {
        Ok(self.playing)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Debug)
            .with_logger_sink(Arc::new(ConsoleLogger {
                min_level: LogLevel::Warn,
            })),
    )?;

    let factory: Arc<dyn EngineFactory> = Arc::new(|| -> BridgeResult<Box<dyn PlaybackEngine>> {
        Ok(Box::new(SimulatedEngine {
            duration_ms: 90_000,
            position_ms: AtomicI64::new(0),
            playing: false,
        }))
    });
    let service = PlaybackService::builder().engine_factory(factory).build()?;
    println!("Listening on channel {}", service.channel());

    let script = [
        r#"{"method": "play", "arguments": {"path": "/sdcard/Music/prelude.mid"}}"#,
        r#"{"method": "getDuration"}"#,
        r#"{"method": "getPosition"}"#,
        r#"{"method": "seek", "arguments": {"position": 45000}}"#,
        r#"{"method": "getPosition"}"#,
        r#"{"method": "pause"}"#,
        r#"{"method": "isPlaying"}"#,
        r#"{"method": "resume"}"#,
        r#"{"method": "setVolume", "arguments": {"volume": 0.5}}"#,
        r#"{"method": "play", "arguments": {"path": "/sdcard/Music/notes.txt"}}"#,
        r#"{"method": "isPlaying"}"#,
        r#"{"method": "stop"}"#,
    ];

    for payload in script {
        let response = service.handle_json(payload);
        println!("{} -> {}", payload, serde_json::to_string(&response)?);
    }

    service.shutdown();
    Ok(())
}
