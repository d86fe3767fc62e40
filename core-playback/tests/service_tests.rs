//! Method channel tests
//!
//! Drives [`PlaybackService`] the way the host's channel handler does: with
//! method names and JSON argument maps.

use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::playback::{EngineFactory, PlaybackEngine};
use core_playback::{ChannelConfig, MethodCall, MethodResponse, PlaybackService, PlaybackState};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Minimal engine tracking position and the number of live instances.
struct CountingEngine {
    live: Arc<AtomicUsize>,
    path: String,
    position_ms: i64,
    playing: bool,
}

impl PlaybackEngine for CountingEngine {
    fn load(&mut self, path: &str) -> BridgeResult<()> {
        if path.ends_with(".txt") {
            return Err(BridgeError::Source(format!("{} is not audio", path)));
        }
        self.path = path.to_string();
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
        self.live.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    fn seek(&mut self, position_ms: i64) -> BridgeResult<()> {
        self.position_ms = position_ms;
        Ok(())
    }

    fn duration_ms(&self) -> BridgeResult<i64> {
        Ok(5000)
    }

    fn position_ms(&self) -> BridgeResult<i64> {
        Ok(self.position_ms)
    }

    fn is_playing(&self) -> BridgeResult<bool> {
        Ok(self.playing)
    }
}

fn service_with(config: ChannelConfig) -> (PlaybackService, Arc<AtomicUsize>) {
    let live = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&live);
    let factory = move || -> BridgeResult<Box<dyn PlaybackEngine>> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingEngine {
            live: Arc::clone(&counter),
            path: String::new(),
            position_ms: 0,
            playing: false,
        }))
    };
    let factory: Arc<dyn EngineFactory> = Arc::new(factory);

    let service = PlaybackService::builder()
        .config(config)
        .engine_factory(factory)
        .build()
        .unwrap();
    (service, live)
}

fn service() -> (PlaybackService, Arc<AtomicUsize>) {
    service_with(ChannelConfig::default())
}

fn call(method: &str, arguments: Value) -> MethodCall {
    MethodCall::new(method).with_arguments(arguments)
}

fn result(response: MethodResponse) -> Value {
    match response {
        MethodResponse::Success { result } => result,
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn test_channel_scenario() {
    let (service, live) = service();

    assert_eq!(
        result(service.handle(&call("play", json!({"path": "song.mid"})))),
        Value::Null
    );
    assert_eq!(live.load(Ordering::SeqCst), 1);
    assert_eq!(result(service.handle(&MethodCall::new("getDuration"))), json!(5000));
    assert_eq!(result(service.handle(&MethodCall::new("isPlaying"))), json!(true));

    service.handle(&call("seek", json!({"position": 2000})));
    assert_eq!(result(service.handle(&MethodCall::new("getPosition"))), json!(2000));

    service.handle(&MethodCall::new("pause"));
    assert_eq!(result(service.handle(&MethodCall::new("isPlaying"))), json!(false));
    service.handle(&MethodCall::new("resume"));
    assert_eq!(result(service.handle(&MethodCall::new("isPlaying"))), json!(true));

    assert_eq!(result(service.handle(&MethodCall::new("stop"))), Value::Null);
    assert_eq!(result(service.handle(&MethodCall::new("getPosition"))), json!(0));
    assert_eq!(result(service.handle(&MethodCall::new("getDuration"))), json!(0));
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn test_play_without_path_is_invalid_argument() {
    let (service, live) = service();

    for arguments in [Value::Null, json!({"path": null}), json!({"path": ""})] {
        let response = service.handle(&call("play", arguments));
        assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));
    }

    assert_eq!(live.load(Ordering::SeqCst), 0);
    assert_eq!(
        service.with_controller(|c| c.state()),
        PlaybackState::Idle
    );
}

#[test]
fn test_play_failure_reports_playback_error() {
    let (service, live) = service();

    let response = service.handle(&call("play", json!({"path": "notes.txt"})));
    match &response {
        MethodResponse::Error { code, message } => {
            assert_eq!(code, "PLAYBACK_ERROR");
            assert!(message.contains("notes.txt"), "message: {message}");
        }
        other => panic!("expected error, got {other:?}"),
    }

    assert_eq!(live.load(Ordering::SeqCst), 0);
    assert_eq!(
        service.with_controller(|c| c.state()),
        PlaybackState::Failed
    );
    assert_eq!(result(service.handle(&MethodCall::new("isPlaying"))), json!(false));
}

#[test]
fn test_unknown_method_is_not_implemented() {
    let (service, _) = service();
    assert_eq!(
        service.handle(&MethodCall::new("setVolume")),
        MethodResponse::NotImplemented
    );
}

#[test]
fn test_seek_argument_handling() {
    let (service, _) = service();
    service.handle(&call("play", json!({"path": "song.mid"})));

    service.handle(&call("seek", json!({"position": 1200})));
    service.handle(&MethodCall::new("seek"));
    assert_eq!(result(service.handle(&MethodCall::new("getPosition"))), json!(0));

    let response = service.handle(&call("seek", json!({"position": "later"})));
    assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));
}

#[test]
fn test_handle_json_payloads() {
    let (service, live) = service();

    let response = service.handle_json(r#"{"method": "play", "arguments": {"path": "song.mid"}}"#);
    assert!(response.is_success());
    assert_eq!(live.load(Ordering::SeqCst), 1);

    let response = service.handle_json(r#"{"method": "stop"}"#);
    assert!(response.is_success());
    assert_eq!(live.load(Ordering::SeqCst), 0);

    let response = service.handle_json("not json");
    assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));
}

#[test]
fn test_custom_argument_keys() {
    let config = ChannelConfig::from_json(r#"{"path_argument": "uri"}"#).unwrap();
    let (service, _) = service_with(config);

    let response = service.handle(&call("play", json!({"path": "song.mid"})));
    assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));

    let response = service.handle(&call("play", json!({"uri": "song.mid"})));
    assert!(response.is_success());
    assert_eq!(service.channel(), "com.example.modern_music_player/midi");
}

#[test]
fn test_shutdown_releases_session() {
    let (service, live) = service();
    service.handle(&call("play", json!({"path": "song.mid"})));

    service.shutdown();
    assert_eq!(live.load(Ordering::SeqCst), 0);
    service.shutdown();
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn test_dropping_service_releases_session() {
    let (service, live) = service();
    service.handle(&call("play", json!({"path": "song.mid"})));
    drop(service);
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn test_concurrent_callers_never_leak_engines() {
    let (service, live) = service();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for j in 0..25 {
                    let path = format!("track-{}-{}.mid", i, j);
                    service.handle(&call("play", json!({ "path": path })));
                    service.handle(&MethodCall::new("getPosition"));
                    if j % 3 == 0 {
                        service.handle(&MethodCall::new("stop"));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(live.load(Ordering::SeqCst) <= 1);
    service.shutdown();
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn test_build_without_factory_fails() {
    let err = PlaybackService::builder().build().err().unwrap();
    assert!(matches!(
        err,
        core_runtime::Error::CapabilityMissing { ref capability, .. } if capability == "EngineFactory"
    ));
}

#[test]
fn test_build_rejects_invalid_config() {
    let factory: Arc<dyn EngineFactory> =
        Arc::new(|| -> BridgeResult<Box<dyn PlaybackEngine>> {
            Err(BridgeError::NotAvailable("unused".into()))
        });
    let config = ChannelConfig {
        channel: String::new(),
        ..Default::default()
    };

    let err = PlaybackService::builder()
        .config(config)
        .engine_factory(factory)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, core_runtime::Error::Config(_)));
}
