use chrono::{TimeZone, Utc};
use dialclock::{
    build_scene, compute_face, hand_angle, hand_endpoint, tick_geometry, Clock, ClockConfig,
    ClockWidget, DrawCommand, FixedClock, HandStyle, HandUnit, RedrawLoop, RedrawState, Typeface,
};
use std::time::{Duration, Instant};

#[test]
fn quarter_past_nine_in_the_evening() {
    let instant = Utc.with_ymd_and_hms(2024, 5, 17, 21, 15, 30).unwrap();
    let sample = FixedClock::at(&instant).sample();
    assert_eq!(sample.hours(), 9);

    let hour = hand_angle(HandUnit::Hour, &sample).degrees();
    let minute = hand_angle(HandUnit::Minute, &sample).degrees();
    let second = hand_angle(HandUnit::Second, &sample).degrees();
    assert!((hour - 277.5).abs() < 1e-9);
    assert!((minute - 93.0).abs() < 1e-9);
    assert!((second - 180.0).abs() < 1e-9);

    // The second hand points straight down
    let face = compute_face(500.0, 500.0, 50.0);
    let tip = hand_endpoint(&face, hand_angle(HandUnit::Second, &sample), 1.0);
    assert!((tip.x - 250.0).abs() < 1e-9);
    assert!((tip.y - 450.0).abs() < 1e-9);
}

#[test]
fn six_numeral_sits_below_center() {
    let face = compute_face(300.0, 300.0, 20.0);
    let six = tick_geometry(&face, 10.0).nth(5).unwrap();
    assert_eq!(six.label(), "6");
    let outer = six.outer(&face);
    assert!((outer.x - 150.0).abs() < 1e-9);
    assert!((outer.y - 280.0).abs() < 1e-9);
}

#[test]
fn redraw_loop_feeds_latest_sample_into_frames() {
    let clock = FixedClock::new(chrono::NaiveTime::from_hms_opt(3, 0, 0).unwrap());
    let widget = ClockWidget::new(
        ClockConfig::builder()
            .hand_style(HandStyle::Gradient)
            .build(),
    );
    let mut redraw = RedrawLoop::new(clock, widget.config().redraw_interval);
    let t0 = Instant::now();
    redraw.start(t0);

    let mut frames = 0;
    for step in 0..10 {
        let now = t0 + Duration::from_millis(step * 11);
        if redraw.tick(now).is_some() {
            let sample = redraw.latest().unwrap();
            let mut buf = vec![0; 64 * 64 * 4];
            widget.draw_frame(&mut buf, 64, 64, 1.0, &sample, &Typeface::Segments);
            frames += 1;
        }
    }
    assert_eq!(frames, 10);

    assert!(redraw.stop());
    assert_eq!(redraw.state(), RedrawState::Stopped);
    assert!(redraw.tick(t0 + Duration::from_secs(5)).is_none());
}

#[test]
fn degenerate_layout_still_produces_full_frame() {
    let sample = FixedClock::new(chrono::NaiveTime::from_hms_opt(3, 0, 0).unwrap()).sample();
    let scene = build_scene(0.0, 0.0, 1.0, &sample, &ClockConfig::default());
    let ticks = scene
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Tick { .. }))
        .count();
    assert_eq!(ticks, 12);
}
