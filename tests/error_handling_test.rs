//! Error handling tests across modules: the small closed set of error kinds
//! and which of them are recoverable per cycle.

use glasswide::calibration::CalibrationRange;
use glasswide::compositor::{compose, Frame};
use glasswide::config::Config;
use glasswide::error::Error;
use glasswide::frame_source::FrameSource;
use std::io::Cursor;
use std::time::Duration;

#[test]
fn test_zero_span_is_a_calibration_error() {
    let result = CalibrationRange::new(15.0, 15.0);
    match result {
        Err(Error::Calibration(msg)) => assert!(msg.contains("span")),
        other => panic!("expected a calibration error, got {other:?}"),
    }
}

#[test]
fn test_short_frame_is_recoverable_then_stream_ends() {
    // One full frame, then a torn one. The torn frame is a per-cycle
    // FrameRead error; after it the stream is gone and counts as stalled.
    let frame_len = 4 * 2 * 3;
    let mut bytes = vec![7u8; frame_len];
    bytes.extend(vec![8u8; frame_len - 1]);

    let source = FrameSource::spawn(Cursor::new(bytes), 4, 2, Duration::from_secs(1)).unwrap();

    assert!(source.next_frame().is_ok());
    assert!(matches!(source.next_frame(), Err(Error::FrameRead(_))));
    assert!(matches!(source.next_frame(), Err(Error::StreamStalled(_))));
}

#[test]
fn test_frame_length_mismatch_is_a_frame_read_error() {
    match Frame::new(4, 2, vec![0u8; 23]) {
        Err(Error::FrameRead(msg)) => assert!(msg.contains("23")),
        other => panic!("expected a frame read error, got {other:?}"),
    }
}

#[test]
fn test_unsplittable_frame_is_a_composite_error() {
    let frame = Frame::new(5, 1, vec![0u8; 15]).unwrap();
    assert!(matches!(compose(&frame, 0.0), Err(Error::Composite(_))));
}

#[test]
fn test_config_validation_errors() {
    let mut config = Config::default();
    config.filter.yaw_threshold_degrees = -1.0;
    match config.validate() {
        Err(Error::Config(msg)) => assert!(msg.contains("threshold")),
        other => panic!("expected a config error, got {other:?}"),
    }

    let mut config = Config::default();
    config.display.frame_read_timeout_secs = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_error_display_formatting() {
    let errors = vec![
        Error::Parse("no yaw token".to_string()),
        Error::FrameRead("short frame".to_string()),
        Error::StreamStalled("no frame within 5.0s".to_string()),
        Error::Calibration("zero span".to_string()),
        Error::Setup("wf-recorder missing".to_string()),
        Error::Composite("bad width".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty());
        assert!(display.contains(": "), "kind prefix missing in {display:?}");
    }
}

#[test]
fn test_errors_cross_threads() {
    use std::sync::Arc;
    use std::thread;

    let error = Arc::new(Error::Setup("sensor driver not found".to_string()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let error = Arc::clone(&error);
            thread::spawn(move || {
                let msg = format!("{}", error);
                assert!(msg.contains("sensor driver"));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_io_errors_convert() {
    let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let error: Error = io_error.into();
    assert!(matches!(error, Error::Io(_)));
    assert!(error.to_string().contains("pipe closed"));
}
