//! Draw-call list for a single frame.
//!
//! A [`Scene`] is rebuilt from scratch for every redraw and thrown away after
//! it has been rasterised.

use crate::config::{ClockConfig, Color, HandConfig, HandStyle};
use crate::geometry::{
    compute_face, hand_angle, hand_endpoint, tick_geometry, ClockFace, HandUnit, Point,
};
use crate::raster::{self, Canvas, Typeface};
use crate::time::TimeSample;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    /// Stroked circle outline.
    Dial {
        center: Point,
        radius: f64,
        thickness: f32,
        color: Color,
    },
    Tick {
        from: Point,
        to: Point,
        thickness: f32,
        color: Color,
    },
    Numeral {
        at: Point,
        text: String,
        size: f32,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        thickness: f32,
        color: Color,
        alpha: f32,
    },
    GradientLine {
        from: Point,
        to: Point,
        thickness: f32,
        color: Color,
    },
    Path {
        points: Vec<Point>,
        thickness: f32,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut Canvas, typeface: &Typeface) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Dial {
                    center,
                    radius,
                    thickness,
                    color,
                } => {
                    raster::stroke_circle(canvas, (center.x, center.y), *radius, *thickness, *color);
                }
                DrawCommand::Tick {
                    from,
                    to,
                    thickness,
                    color,
                } => {
                    raster::stroke_line(
                        canvas,
                        (from.x, from.y),
                        (to.x, to.y),
                        *thickness,
                        *color,
                        1.0,
                    );
                }
                DrawCommand::Numeral {
                    at,
                    text,
                    size,
                    color,
                } => {
                    typeface.draw_centered(canvas, (at.x, at.y), text, *size, *color);
                }
                DrawCommand::Line {
                    from,
                    to,
                    thickness,
                    color,
                    alpha,
                } => {
                    raster::stroke_line(
                        canvas,
                        (from.x, from.y),
                        (to.x, to.y),
                        *thickness,
                        *color,
                        *alpha,
                    );
                }
                DrawCommand::GradientLine {
                    from,
                    to,
                    thickness,
                    color,
                } => {
                    raster::stroke_gradient_line(
                        canvas,
                        (from.x, from.y),
                        (to.x, to.y),
                        *thickness,
                        *color,
                    );
                }
                DrawCommand::Path {
                    points,
                    thickness,
                    color,
                } => {
                    let points: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
                    raster::stroke_path(canvas, &points, *thickness, *color);
                }
            }
        }
    }
}

/// Builds the frame for `sample` on a surface of `width` x `height` physical
/// pixels. Configured lengths are multiplied by `scale`.
pub fn build_scene(
    width: f64,
    height: f64,
    scale: f64,
    sample: &TimeSample,
    config: &ClockConfig,
) -> Scene {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let face = compute_face(width, height, config.dial_margin * scale);
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(config.background_color));
    add_dial(&mut scene, &face, scale, config);
    for (unit, hand) in [
        (HandUnit::Hour, &config.hour_hand),
        (HandUnit::Minute, &config.minute_hand),
        (HandUnit::Second, &config.second_hand),
    ] {
        add_hand(&mut scene, &face, unit, sample, hand, scale, config);
    }
    scene
}

fn add_dial(scene: &mut Scene, face: &ClockFace, scale: f64, config: &ClockConfig) {
    scene.add_command(DrawCommand::Dial {
        center: face.center,
        radius: face.radius,
        thickness: config.dial_thickness * scale as f32,
        color: config.dial_color,
    });
    let numeral_radius = (face.radius - config.numeral_inset * scale).max(0.0);
    for mark in tick_geometry(face, config.tick_length * scale) {
        scene.add_command(DrawCommand::Numeral {
            at: face.point_at(mark.angle, numeral_radius),
            text: mark.label(),
            size: config.numeral_font_size * scale as f32,
            color: config.numeral_color,
        });
        scene.add_command(DrawCommand::Tick {
            from: mark.inner(face),
            to: mark.outer(face),
            thickness: config.tick_thickness * scale as f32,
            color: config.dial_color,
        });
    }
}

fn add_hand(
    scene: &mut Scene,
    face: &ClockFace,
    unit: HandUnit,
    sample: &TimeSample,
    hand: &HandConfig,
    scale: f64,
    config: &ClockConfig,
) {
    let from = face.center;
    let to = hand_endpoint(face, hand_angle(unit, sample), hand.length_fraction);
    let thickness = hand.width * scale as f32;
    match config.hand_style {
        HandStyle::Standard => scene.add_command(DrawCommand::Line {
            from,
            to,
            thickness,
            color: hand.color,
            alpha: 1.0,
        }),
        HandStyle::Gradient => scene.add_command(DrawCommand::GradientLine {
            from,
            to,
            thickness,
            color: hand.color,
        }),
        HandStyle::Tapered => scene.add_command(DrawCommand::Path {
            points: vec![from, to],
            thickness,
            color: hand.color,
        }),
        HandStyle::Shadowed => {
            let offset = config.shadow_offset * scale;
            scene.add_command(DrawCommand::Line {
                from: from.offset(offset, offset),
                to: to.offset(offset, offset),
                thickness,
                color: hand.color,
                alpha: config.shadow_alpha,
            });
            scene.add_command(DrawCommand::Line {
                from,
                to,
                thickness,
                color: hand.color,
                alpha: 1.0,
            });
        }
    }
}
