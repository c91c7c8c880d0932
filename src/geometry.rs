//! Time-to-geometry mapping for the dial.
//!
//! Angles are in degrees, measured clockwise from 12 o'clock. They are turned
//! into screen coordinates (y pointing down) by rotating the zero reference
//! from 3 o'clock back to 12 o'clock, i.e. `radians(angle - 90)`.

use crate::time::TimeSample;

/// Number of hour positions on the dial.
pub const HOUR_MARKS: usize = 12;

const DEGREES_PER_HOUR: f64 = 360.0 / 12.0;
const DEGREES_PER_MINUTE: f64 = 360.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The circular face: a center and a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockFace {
    pub center: Point,
    pub radius: f64,
}

impl ClockFace {
    /// Point at `distance` from the center along the clockwise dial `angle`.
    pub fn point_at(&self, angle: HandAngle, distance: f64) -> Point {
        let radian = (angle.degrees() - 90.0).to_radians();
        Point::new(
            self.center.x + distance * radian.cos(),
            self.center.y + distance * radian.sin(),
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }
}

/// Lays the face out in the available space.
///
/// The radius is `min(width, height) / 2 - margin`, clamped to zero so that
/// a cramped layout collapses the dial to a point instead of inverting it.
pub fn compute_face(available_width: f64, available_height: f64, margin: f64) -> ClockFace {
    let width = available_width.max(0.0);
    let height = available_height.max(0.0);
    let radius = (width.min(height) / 2.0 - margin).max(0.0);
    ClockFace {
        center: Point::new(width / 2.0, height / 2.0),
        radius,
    }
}

/// Angle in degrees within `[0, 360)`, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HandAngle(f64);

impl HandAngle {
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360
        if normalized >= 360.0 || !normalized.is_finite() {
            Self(0.0)
        } else {
            Self(normalized)
        }
    }

    pub fn degrees(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandUnit {
    Hour,
    Minute,
    Second,
}

pub fn hand_angle(unit: HandUnit, sample: &TimeSample) -> HandAngle {
    let degrees = match unit {
        HandUnit::Hour => {
            (f64::from(sample.hours() % 12) + f64::from(sample.minutes()) / 60.0)
                * DEGREES_PER_HOUR
        }
        HandUnit::Minute => {
            (f64::from(sample.minutes()) + f64::from(sample.seconds()) / 60.0)
                * DEGREES_PER_MINUTE
        }
        HandUnit::Second => {
            (f64::from(sample.seconds()) + sample.sub_second()) * DEGREES_PER_MINUTE
        }
    };
    HandAngle::from_degrees(degrees)
}

/// Tip of a hand `length_fraction` of the radius long, pointing at `angle`.
pub fn hand_endpoint(face: &ClockFace, angle: HandAngle, length_fraction: f64) -> Point {
    face.point_at(angle, face.radius * length_fraction)
}

/// One hour mark on the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    /// Hour position, 1 through 12. Doubles as the numeral label.
    pub index: u32,
    pub angle: HandAngle,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl TickMark {
    /// Conventional trigonometric angle of the mark in degrees: `index * 30 - 90`.
    pub fn trig_degrees(&self) -> f64 {
        f64::from(self.index) * DEGREES_PER_HOUR - 90.0
    }

    pub fn inner(&self, face: &ClockFace) -> Point {
        face.point_at(self.angle, self.inner_radius)
    }

    pub fn outer(&self, face: &ClockFace) -> Point {
        face.point_at(self.angle, self.outer_radius)
    }

    pub fn label(&self) -> String {
        self.index.to_string()
    }
}

/// Lazy sequence of the twelve hour marks. Call [`tick_geometry`] again to
/// start over.
#[derive(Debug, Clone)]
pub struct Ticks {
    next: u32,
    inner_radius: f64,
    outer_radius: f64,
}

impl Iterator for Ticks {
    type Item = TickMark;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next as usize > HOUR_MARKS {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(TickMark {
            index,
            angle: HandAngle::from_degrees(f64::from(index) * DEGREES_PER_HOUR),
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (HOUR_MARKS + 1).saturating_sub(self.next as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ticks {}

impl std::iter::FusedIterator for Ticks {}

/// The twelve hour marks, 1 through 12, each running inward from the dial
/// edge by `tick_length`.
///
/// [`TickMark::angle`] is in the same clockwise-from-12 convention as the
/// hands (`index * 30`, so 12 maps to 0). [`TickMark::trig_degrees`] gives the
/// conventional trigonometric angle `index * 30 - 90` the mark is drawn at.
pub fn tick_geometry(face: &ClockFace, tick_length: f64) -> Ticks {
    Ticks {
        next: 1,
        inner_radius: (face.radius - tick_length.max(0.0)).max(0.0),
        outer_radius: face.radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn face() -> ClockFace {
        compute_face(400.0, 300.0, 20.0)
    }

    #[test]
    fn face_uses_smaller_side() {
        let face = face();
        assert_eq!(face.center, Point::new(200.0, 150.0));
        assert_close(face.radius, 130.0);
    }

    #[test]
    fn face_clamps_to_point() {
        let face = compute_face(0.0, 0.0, 20.0);
        assert_eq!(face.radius, 0.0);
        assert!(face.is_degenerate());

        let face = compute_face(-10.0, 50.0, 20.0);
        assert_eq!(face.radius, 0.0);
        assert_eq!(face.center, Point::new(0.0, 25.0));
    }

    #[test]
    fn face_is_idempotent() {
        assert_eq!(compute_face(123.0, 456.0, 7.5), compute_face(123.0, 456.0, 7.5));
    }

    #[test]
    fn hour_angle_over_whole_dial() {
        for hours in 0..12 {
            for minutes in 0..60 {
                let sample = TimeSample::new(hours, minutes, 0, 0.0);
                let angle = hand_angle(HandUnit::Hour, &sample).degrees();
                let expected = ((f64::from(hours % 12) + f64::from(minutes) / 60.0) * 30.0) % 360.0;
                assert!((0.0..360.0).contains(&angle));
                assert_close(angle, expected);
            }
        }
    }

    #[test]
    fn minute_angle_includes_seconds() {
        let sample = TimeSample::new(0, 15, 30, 0.0);
        assert_close(hand_angle(HandUnit::Minute, &sample).degrees(), 93.0);
    }

    #[test]
    fn second_hand_glides_then_wraps() {
        for seconds in 0..60 {
            let mut previous = -1.0;
            for step in 0..10 {
                let sub = f64::from(step) / 10.0;
                let sample = TimeSample::new(0, 0, seconds, sub);
                let angle = hand_angle(HandUnit::Second, &sample).degrees();
                assert_close(angle, (f64::from(seconds) + sub) * 6.0 % 360.0);
                assert!(angle >= previous);
                previous = angle;
            }
        }

        let end_of_minute = TimeSample::new(0, 0, 59, 0.999);
        let next_minute = TimeSample::new(0, 1, 0, 0.0);
        assert!(hand_angle(HandUnit::Second, &end_of_minute).degrees() > 359.0);
        assert_eq!(hand_angle(HandUnit::Second, &next_minute).degrees(), 0.0);
    }

    #[test]
    fn angle_normalization() {
        assert_eq!(HandAngle::from_degrees(360.0).degrees(), 0.0);
        assert_close(HandAngle::from_degrees(-30.0).degrees(), 330.0);
        assert_close(HandAngle::from_degrees(750.0).degrees(), 30.0);
        assert!(HandAngle::from_degrees(-1e-18).degrees() < 360.0);
        assert_eq!(HandAngle::from_degrees(f64::NAN).degrees(), 0.0);
    }

    #[test]
    fn zero_angle_points_up() {
        let face = face();
        let tip = hand_endpoint(&face, HandAngle::from_degrees(0.0), 1.0);
        assert_close(tip.x, face.center.x);
        assert_close(tip.y, face.center.y - face.radius);
    }

    #[test]
    fn three_oclock() {
        let face = face();
        let sample = TimeSample::new(3, 0, 0, 0.0);
        let hour = hand_angle(HandUnit::Hour, &sample);
        assert_close(hour.degrees(), 90.0);
        assert_close(hand_angle(HandUnit::Minute, &sample).degrees(), 0.0);
        assert_close(hand_angle(HandUnit::Second, &sample).degrees(), 0.0);

        let tip = hand_endpoint(&face, hour, 0.5);
        assert_close(tip.x, face.center.x + face.radius * 0.5);
        assert_close(tip.y, face.center.y);
    }

    #[test]
    fn twelve_ticks_thirty_degrees_apart() {
        for size in [0.0, 10.0, 400.0, 5000.0] {
            let face = compute_face(size, size, 20.0);
            let ticks: Vec<_> = tick_geometry(&face, 10.0).collect();
            assert_eq!(ticks.len(), HOUR_MARKS);
            assert_eq!(ticks[0].index, 1);
            assert_eq!(ticks[11].index, 12);
            for pair in ticks.windows(2) {
                let step = (pair[1].angle.degrees() - pair[0].angle.degrees()).rem_euclid(360.0);
                assert_close(step, 30.0);
                assert_close(pair[1].trig_degrees() - pair[0].trig_degrees(), 30.0);
            }
        }
    }

    #[test]
    fn tick_angles_use_dial_convention() {
        let face = face();
        let marks: Vec<_> = tick_geometry(&face, 10.0).collect();
        let three = marks[2];
        assert_close(three.angle.degrees(), 90.0);
        assert_close(three.trig_degrees(), 0.0);
        let twelve = marks[11];
        assert_eq!(twelve.angle.degrees(), 0.0);
        assert_close(twelve.trig_degrees(), 270.0);
    }

    #[test]
    fn ticks_are_restartable_and_sized() {
        let face = face();
        let ticks = tick_geometry(&face, 10.0);
        assert_eq!(ticks.len(), 12);
        let mut first = ticks.clone();
        first.next();
        assert_eq!(first.len(), 11);
        assert_eq!(ticks.count(), 12);
        assert_eq!(tick_geometry(&face, 10.0).count(), 12);
    }

    #[test]
    fn tick_radii_stay_on_dial() {
        let face = face();
        let twelve = tick_geometry(&face, 10.0).last().unwrap();
        assert_eq!(twelve.label(), "12");
        assert_close(twelve.outer_radius, 130.0);
        assert_close(twelve.inner_radius, 120.0);
        let top = twelve.outer(&face);
        assert_close(top.x, face.center.x);
        assert_close(top.y, face.center.y - 130.0);

        let tiny = compute_face(30.0, 30.0, 10.0);
        let mark = tick_geometry(&tiny, 10.0).next().unwrap();
        assert_eq!(mark.inner_radius, 0.0);
    }
}
