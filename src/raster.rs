//! Immediate-mode rasterisation onto an RGBA8 frame.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;

/// Borrowed RGBA8 frame of `width * height` pixels.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wraps `frame`. Rows past the end of a short buffer are dropped.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let height = if width == 0 {
            0
        } else {
            height.min(frame.len() / (width * 4))
        };
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        let len = self.width * self.height * 4;
        for chunk in self.frame[..len].chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    /// Alpha-blends `color` over the pixel at `(x, y)`. Off-frame writes are ignored.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let idx = (y as usize * self.width + x as usize) * 4;
        let src = [color.r, color.g, color.b];
        for (channel, s) in self.frame[idx..idx + 3].iter_mut().zip(src) {
            *channel = (f32::from(s) * a + f32::from(*channel) * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

/// Anti-aliased round-capped line. `alpha_at(t)` scales coverage along the
/// line, `t` running from 0 at the start to 1 at the end.
fn stroke_line_with<F>(
    canvas: &mut Canvas,
    from: (f64, f64),
    to: (f64, f64),
    thickness: f32,
    color: Color,
    alpha_at: F,
) where
    F: Fn(f32) -> f32,
{
    let (x0, y0) = (from.0 as f32, from.1 as f32);
    let (x1, y1) = (to.0 as f32, to.1 as f32);
    let half = thickness.max(0.0) / 2.0;
    let pad = half.ceil() + 1.0;
    let min_x = (x0.min(x1) - pad).floor() as i32;
    let max_x = (x0.max(x1) + pad).ceil() as i32;
    let min_y = (y0.min(y1) - pad).floor() as i32;
    let max_y = (y0.max(y1) + pad).ceil() as i32;
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    for y in min_y.max(0)..=max_y.min(canvas.height as i32 - 1) {
        for x in min_x.max(0)..=max_x.min(canvas.width as i32 - 1) {
            let px = x as f32 - x0;
            let py = y as f32 - y0;
            // Zero-length segments collapse to a round dot
            let t = if len_sq > 0.0 {
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let lx = x0 + t * dx;
            let ly = y0 + t * dy;
            let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
            let aa = (1.0 - (dist - half).clamp(0.0, 1.0)) * alpha_at(t);
            if aa > 0.01 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

pub fn stroke_line(
    canvas: &mut Canvas,
    from: (f64, f64),
    to: (f64, f64),
    thickness: f32,
    color: Color,
    alpha: f32,
) {
    stroke_line_with(canvas, from, to, thickness, color, |_| alpha);
}

/// Line that fades from `color` at `from` to transparent at `to`.
pub fn stroke_gradient_line(
    canvas: &mut Canvas,
    from: (f64, f64),
    to: (f64, f64),
    thickness: f32,
    color: Color,
) {
    stroke_line_with(canvas, from, to, thickness, color, |t| 1.0 - t);
}

/// Strokes consecutive points as one polyline.
pub fn stroke_path(canvas: &mut Canvas, points: &[(f64, f64)], thickness: f32, color: Color) {
    match points {
        [] => {}
        [only] => stroke_line(canvas, *only, *only, thickness, color, 1.0),
        _ => {
            for segment in points.windows(2) {
                stroke_line(canvas, segment[0], segment[1], thickness, color, 1.0);
            }
        }
    }
}

/// Anti-aliased circle outline centred on the stroke radius.
pub fn stroke_circle(
    canvas: &mut Canvas,
    center: (f64, f64),
    radius: f64,
    thickness: f32,
    color: Color,
) {
    let half = f64::from(thickness.max(0.0)) / 2.0;
    let outer = radius + half;
    let inner = (radius - half).max(0.0);
    let reach = outer.ceil() as i32 + 1;
    let (cx, cy) = center;
    let (icx, icy) = (cx.round() as i32, cy.round() as i32);
    for y in (icy - reach).max(0)..=(icy + reach).min(canvas.height as i32 - 1) {
        for x in (icx - reach).max(0)..=(icx + reach).min(canvas.width as i32 - 1) {
            let dist = ((f64::from(x) - cx).powi(2) + (f64::from(y) - cy).powi(2)).sqrt();
            let aa = if dist > outer {
                1.0 - (dist - outer).min(1.0)
            } else if dist < inner {
                1.0 - (inner - dist).min(1.0)
            } else {
                1.0
            };
            if aa > 0.0 {
                canvas.blend(x, y, color, aa as f32);
            }
        }
    }
}

/// How numerals are turned into pixels.
pub enum Typeface {
    Font(Font<'static>),
    /// Seven-segment digits stroked with the line primitive.
    Segments,
}

impl Typeface {
    pub fn draw_centered(
        &self,
        canvas: &mut Canvas,
        center: (f64, f64),
        text: &str,
        size: f32,
        color: Color,
    ) {
        match self {
            Typeface::Font(font) => draw_text(canvas, center, text, font, Scale::uniform(size), color),
            Typeface::Segments => draw_segment_text(canvas, center, text, size, color),
        }
    }
}

/// Draws `text` with its pixel bounding box centred on `center`.
fn draw_text(
    canvas: &mut Canvas,
    center: (f64, f64),
    text: &str,
    font: &Font,
    scale: Scale,
    color: Color,
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    if min_x >= max_x || min_y >= max_y {
        return;
    }
    let offset_x = center.0.round() as i32 - (max_x - min_x) / 2;
    let offset_y = center.1.round() as i32 - (max_y - min_y) / 2;
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                canvas.blend(px, py, color, v);
            });
        }
    }
}

// Segment endpoints on a unit cell, x in [0, 1] and y in [0, 2]:
// top, upper right, lower right, bottom, lower left, upper left, middle.
const SEGMENTS: [((f64, f64), (f64, f64)); 7] = [
    ((0.0, 0.0), (1.0, 0.0)),
    ((1.0, 0.0), (1.0, 1.0)),
    ((1.0, 1.0), (1.0, 2.0)),
    ((0.0, 2.0), (1.0, 2.0)),
    ((0.0, 1.0), (0.0, 2.0)),
    ((0.0, 0.0), (0.0, 1.0)),
    ((0.0, 1.0), (1.0, 1.0)),
];

fn digit_segments(digit: char) -> &'static [usize] {
    match digit {
        '0' => &[0, 1, 2, 3, 4, 5],
        '1' => &[1, 2],
        '2' => &[0, 1, 6, 4, 3],
        '3' => &[0, 1, 6, 2, 3],
        '4' => &[5, 6, 1, 2],
        '5' => &[0, 5, 6, 2, 3],
        '6' => &[0, 5, 4, 3, 2, 6],
        '7' => &[0, 1, 2],
        '8' => &[0, 1, 2, 3, 4, 5, 6],
        '9' => &[6, 5, 0, 1, 2, 3],
        _ => &[],
    }
}

fn draw_segment_text(canvas: &mut Canvas, center: (f64, f64), text: &str, size: f32, color: Color) {
    let height = f64::from(size) * 0.6;
    let cell = height / 2.0;
    let gap = cell * 0.6;
    let thickness = (size / 12.0).max(1.0);
    let count = text.chars().count() as f64;
    if count == 0.0 {
        return;
    }
    let total_width = count * cell + (count - 1.0) * gap;
    let left = center.0 - total_width / 2.0;
    let top = center.1 - height / 2.0;
    for (i, digit) in text.chars().enumerate() {
        let origin_x = left + i as f64 * (cell + gap);
        for &segment in digit_segments(digit) {
            let ((ax, ay), (bx, by)) = SEGMENTS[segment];
            stroke_line(
                canvas,
                (origin_x + ax * cell, top + ay * cell),
                (origin_x + bx * cell, top + by * cell),
                thickness,
                color,
                1.0,
            );
        }
    }
}
