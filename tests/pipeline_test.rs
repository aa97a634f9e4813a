//! End-to-end tests of the orientation -> filter -> mapper -> compositor
//! pipeline, driven through the public API the way the presentation loop
//! drives it.

use glasswide::calibration::{calibrate, CalibrationRange};
use glasswide::compositor::{compose, Frame};
use glasswide::constants::BYTES_PER_PIXEL;
use glasswide::filter::YawFilter;
use glasswide::frame_source::FrameSource;
use glasswide::orientation::{LatestYaw, OrientationReader};
use std::io::Cursor;
use std::thread;
use std::time::{Duration, Instant};

const W: usize = 16;
const H: usize = 4;

/// A wide two-segment frame whose columns are numbered: segment A carries
/// 0..W, segment B carries 100..100+W.
fn wide_frame() -> Frame {
    let mut data = Vec::with_capacity(2 * W * H * BYTES_PER_PIXEL);
    for _row in 0..H {
        for col in 0..2 * W {
            let v = if col < W { col as u8 } else { 100 + (col - W) as u8 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    Frame::new(2 * W, H, data).unwrap()
}

fn segment_a() -> Frame {
    wide_frame().columns(0, W).unwrap()
}

fn segment_b() -> Frame {
    wide_frame().columns(W, 2 * W).unwrap()
}

#[test]
fn test_straight_ahead_round_trip() {
    // Calibration (-30, 30), accepted yaw 0.0: pan is exactly 0 and the
    // output is segment B byte for byte
    let range = CalibrationRange::new(-30.0, 30.0).unwrap();
    let pan = range.normalize(0.0);
    assert_eq!(pan, 0.0);
    assert_eq!(compose(&wide_frame(), pan).unwrap(), segment_b());
}

#[test]
fn test_leftmost_yaw_round_trip() {
    // Accepted yaw at the left calibration endpoint: pan -1, segment A
    let range = CalibrationRange::new(-30.0, 30.0).unwrap();
    let pan = range.normalize(-30.0);
    assert_eq!(pan, -1.0);
    assert_eq!(compose(&wide_frame(), pan).unwrap(), segment_a());
}

#[test]
fn test_sustained_left_turn_reaches_segment_a() {
    // Drive the filter with a hard left turn; the smoothed yaw walks past
    // the left calibration endpoint and the view settles on segment A
    let range = CalibrationRange::new(-30.0, 30.0).unwrap();
    let t0 = Instant::now();
    let mut filter = YawFilter::new(0.2, 5.0, Duration::from_millis(300), 0.0, t0);

    let frame = wide_frame();
    let mut now = t0;
    let mut last_view = None;
    for _cycle in 0..20 {
        now += Duration::from_secs(1);
        if let Some(yaw) = filter.apply(-60.0, now) {
            let pan = range.normalize(yaw);
            last_view = Some(compose(&frame, pan).unwrap());
            if pan == -1.0 {
                break;
            }
        }
    }

    assert_eq!(last_view.expect("no update was ever accepted"), segment_a());
}

#[test]
fn test_sensor_stream_to_viewport() {
    // Sensor lines flow through the background reader into the slot; the
    // loop picks up the latest value only
    let input = Cursor::new("Yaw: 10.0\nYaw: -45.5\n");
    let reader = OrientationReader::spawn(input).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while reader.latest() != Some(-45.5) {
        assert!(Instant::now() < deadline, "reader never published the last sample");
        thread::sleep(Duration::from_millis(1));
    }

    let range = CalibrationRange::new(-30.0, 30.0).unwrap();
    let t0 = Instant::now();
    let mut filter = YawFilter::new(0.2, 5.0, Duration::from_millis(300), 0.0, t0);

    let yaw = filter
        .apply(reader.latest().unwrap(), t0 + Duration::from_secs(1))
        .expect("a 45 degree jump must be accepted");
    // 0 * 0.8 + -45.5 * 0.2
    assert!((yaw - -9.1).abs() < 1e-12);

    let view = compose(&wide_frame(), range.normalize(yaw)).unwrap();
    assert_eq!((view.width(), view.height()), (W, H));
}

#[test]
fn test_malformed_sensor_line_is_a_no_op() {
    // A noise-only stream publishes nothing; the loop skips the cycle and
    // the filter state stays frozen, so the previous pan would be reused
    let reader = OrientationReader::spawn(Cursor::new("noise\n")).unwrap();
    thread::sleep(Duration::from_millis(50));

    let t0 = Instant::now();
    let filter = YawFilter::new(0.2, 5.0, Duration::from_millis(300), 12.0, t0);

    assert_eq!(reader.latest(), None);
    // No sample means apply is never called; state is untouched
    assert_eq!(filter.previous_yaw(), 12.0);
}

#[test]
fn test_frame_stream_feeds_compositor() {
    // Two wide frames back to back through the frame source, composed in
    // read order
    let wide = wide_frame();
    let mut bytes = wide.data().to_vec();
    bytes.extend_from_slice(wide.data());

    let source = FrameSource::spawn(Cursor::new(bytes), 2 * W, H, Duration::from_secs(1)).unwrap();

    for _ in 0..2 {
        let frame = source.next_frame().unwrap();
        let view = compose(&frame, 0.0).unwrap();
        assert_eq!(view, segment_b());
    }
}

#[test]
fn test_calibration_seeds_the_filter() {
    // The app seeds the filter from the sensor's startup reading so the
    // first smoothed values are relative to where the user is looking
    let latest = LatestYaw::new();
    latest.store(-4.25);

    let cal = calibrate(
        &latest,
        Duration::from_secs(1),
        Cursor::new("-30\n30\n"),
        Vec::new(),
    )
    .unwrap();

    let t0 = Instant::now();
    let mut filter = YawFilter::new(
        0.2,
        5.0,
        Duration::from_millis(300),
        cal.initial_yaw.unwrap(),
        t0,
    );
    assert_eq!(filter.previous_yaw(), -4.25);

    // -4.25 * 0.8 + 30 * 0.2 = 2.6
    let yaw = filter.apply(30.0, t0 + Duration::from_secs(1)).unwrap();
    assert!((yaw - 2.6).abs() < 1e-12);
    assert!((cal.range.normalize(yaw) - 2.6 / 30.0).abs() < 1e-12);
}
