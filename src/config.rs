use std::time::Duration;

use bon::Builder;

/// Color representation for dial and hand elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const GRAY: Color = Color::new(0x88, 0x88, 0x88);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Stroke style shared by all three hands.
///
/// The endpoint geometry is identical for every variant; only the way the
/// stroke is laid down differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandStyle {
    /// Plain round-capped stroke.
    #[default]
    Standard,
    /// Stroke whose alpha fades linearly from the center to the tip.
    Gradient,
    /// Stroke laid down through the path primitive.
    Tapered,
    /// Offset translucent copy under the main stroke.
    Shadowed,
}

/// Appearance of a single hand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandConfig {
    /// Hand length as a fraction of the dial radius.
    pub length_fraction: f64,
    pub width: f32,
    pub color: Color,
}

impl HandConfig {
    pub const fn new(length_fraction: f64, width: f32, color: Color) -> Self {
        Self {
            length_fraction,
            width,
            color,
        }
    }

    pub const fn hour() -> Self {
        Self::new(0.5, 10.0, Color::BLACK)
    }

    pub const fn minute() -> Self {
        Self::new(0.75, 10.0, Color::GRAY)
    }

    pub const fn second() -> Self {
        Self::new(0.9, 10.0, Color::RED)
    }
}

/// Complete clock configuration.
///
/// Lengths are logical pixels; they are multiplied by the window scale
/// factor when a frame is built.
#[derive(Debug, Clone, Builder)]
pub struct ClockConfig {
    // Window configuration
    #[builder(default = "Analog Clock".to_string())]
    pub title: String,
    #[builder(default = 400)]
    pub window_width: u32,
    #[builder(default = 400)]
    pub window_height: u32,
    #[builder(default = Duration::from_millis(11))]
    pub redraw_interval: Duration,

    // Dial configuration
    #[builder(default = 36.0)]
    pub dial_margin: f64,
    #[builder(default = 5.0)]
    pub dial_thickness: f32,
    #[builder(default = 10.0)]
    pub tick_length: f64,
    #[builder(default = 3.0)]
    pub tick_thickness: f32,
    #[builder(default = 30.0)]
    pub numeral_inset: f64,
    #[builder(default = 40.0)]
    pub numeral_font_size: f32,

    // Hand configuration
    #[builder(default)]
    pub hand_style: HandStyle,
    #[builder(default = HandConfig::hour())]
    pub hour_hand: HandConfig,
    #[builder(default = HandConfig::minute())]
    pub minute_hand: HandConfig,
    #[builder(default = HandConfig::second())]
    pub second_hand: HandConfig,
    #[builder(default = 5.0)]
    pub shadow_offset: f64,
    #[builder(default = 0.7)]
    pub shadow_alpha: f32,

    // Colors
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    #[builder(default = Color::BLACK)]
    pub dial_color: Color,
    #[builder(default = Color::BLACK)]
    pub numeral_color: Color,

    // Font configuration; numerals fall back to stroked digits without one
    pub font_data: Option<Vec<u8>>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
