// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod config;
pub mod geometry;
pub mod raster;
pub mod redraw;
pub mod scene;
pub mod time;

// External crate imports
use log::{debug, error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use thiserror::Error;

// Standard library imports
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, StartCause, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use config::{ClockConfig, Color, HandConfig, HandStyle};
pub use geometry::{
    compute_face, hand_angle, hand_endpoint, tick_geometry, ClockFace, HandAngle, HandUnit, Point,
    TickMark, Ticks,
};
pub use raster::{Canvas, Typeface};
pub use redraw::{RedrawLoop, RedrawState};
pub use scene::{build_scene, DrawCommand, Scene};
pub use time::{sample_time, Clock, FixedClock, SystemClock, TimeSample};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("could not create window: {0}")]
    Window(#[from] OsError),
    #[error("could not create pixel surface: {0}")]
    Surface(#[from] pixels::Error),
    #[error("font data is not a usable TrueType/OpenType font")]
    FontParse,
    #[error("could not read font {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a TTF/OTF file for [`ClockConfig::font_data`].
pub fn load_font(path: impl AsRef<Path>) -> Result<Vec<u8>, ClockError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| ClockError::FontRead {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Analog clock window - the primary public interface
#[derive(Debug, Clone)]
pub struct ClockWidget {
    config: ClockConfig,
}

impl ClockWidget {
    pub fn new(config: ClockConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Resolves the configured font, falling back to stroked digits when none is set.
    pub fn typeface(&self) -> Result<Typeface, ClockError> {
        match &self.config.font_data {
            Some(data) => Font::try_from_vec(data.clone())
                .map(Typeface::Font)
                .ok_or(ClockError::FontParse),
            None => {
                warn!("no font configured, drawing numerals as stroked digits");
                Ok(Typeface::Segments)
            }
        }
    }

    /// Rasterises one frame for `sample` into an RGBA8 buffer.
    pub fn draw_frame(
        &self,
        frame: &mut [u8],
        width: usize,
        height: usize,
        scale: f64,
        sample: &TimeSample,
        typeface: &Typeface,
    ) {
        let mut canvas = Canvas::new(frame, width, height);
        let scene = build_scene(width as f64, height as f64, scale, sample, &self.config);
        scene.render(&mut canvas, typeface);
    }

    /// Opens the clock window and blocks until it is closed.
    pub fn show(&self) -> Result<(), ClockError> {
        self.show_with_clock(SystemClock::new())
    }

    pub fn show_with_clock<C: Clock>(&self, clock: C) -> Result<(), ClockError> {
        let typeface = self.typeface()?;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                f64::from(self.config.window_width),
                f64::from(self.config.window_height),
            ))
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let mut fb_width = size.width;
        let mut fb_height = size.height;
        let mut scale_factor = window.scale_factor();
        let (surface_width, surface_height) = surface_extent(size.width, size.height);
        let surface_texture = SurfaceTexture::new(surface_width, surface_height, &window);
        let mut pixels = Pixels::new(surface_width, surface_height, surface_texture)?;

        let mut redraw = RedrawLoop::new(clock, self.config.redraw_interval);

        event_loop.run(move |event, window_target| match event {
            Event::NewEvents(StartCause::Init) => {
                if redraw.start(Instant::now()) {
                    info!("clock shown at {fb_width}x{fb_height}, scale {scale_factor}");
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    redraw.stop();
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    debug!("resized to {}x{}", new_size.width, new_size.height);
                    fb_width = new_size.width;
                    fb_height = new_size.height;
                    if fb_width == 0 || fb_height == 0 {
                        return;
                    }
                    if let Err(err) = pixels.resize_buffer(fb_width, fb_height) {
                        warn!("could not resize frame buffer: {err}");
                    }
                    if let Err(err) = pixels.resize_surface(fb_width, fb_height) {
                        warn!("could not resize surface: {err}");
                    }
                }
                WindowEvent::ScaleFactorChanged {
                    scale_factor: new_scale,
                    ..
                } => {
                    debug!("scale factor changed to {new_scale}");
                    scale_factor = new_scale;
                }
                WindowEvent::RedrawRequested => {
                    // Minimised windows have nothing to draw into
                    if fb_width == 0 || fb_height == 0 {
                        return;
                    }
                    let Some(sample) = redraw.latest() else {
                        return;
                    };
                    self.draw_frame(
                        pixels.frame_mut(),
                        fb_width as usize,
                        fb_height as usize,
                        scale_factor,
                        &sample,
                        &typeface,
                    );
                    if let Err(err) = pixels.render() {
                        error!("present failed: {err}");
                        redraw.stop();
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if redraw.tick(Instant::now()).is_some() {
                    window_clone.request_redraw();
                }
                match redraw.next_deadline() {
                    Some(deadline) => {
                        window_target.set_control_flow(ControlFlow::WaitUntil(deadline))
                    }
                    None => window_target.set_control_flow(ControlFlow::Wait),
                }
            }
            Event::LoopExiting => {
                redraw.stop();
            }
            _ => {}
        })?;

        Ok(())
    }
}

/// `pixels` refuses empty surfaces; a zero-sized window starts with a 1x1 one
/// and picks up its real size on the first non-empty resize.
fn surface_extent(width: u32, height: u32) -> (u32, u32) {
    (width.max(1), height.max(1))
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_falls_back_to_segments() {
        let widget = ClockWidget::default();
        assert!(matches!(widget.typeface(), Ok(Typeface::Segments)));
    }

    #[test]
    fn garbage_font_is_rejected() {
        let config = ClockConfig::builder().font_data(vec![0, 1, 2, 3]).build();
        let widget = ClockWidget::new(config);
        assert!(matches!(widget.typeface(), Err(ClockError::FontParse)));
    }

    #[test]
    fn unreadable_font_path_reports_path() {
        let err = load_font("/definitely/not/a/font.ttf").unwrap_err();
        match err {
            ClockError::FontRead { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/a/font.ttf"))
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn empty_window_gets_minimal_surface() {
        assert_eq!(surface_extent(0, 0), (1, 1));
        assert_eq!(surface_extent(0, 300), (1, 300));
        assert_eq!(surface_extent(640, 480), (640, 480));
    }

    #[test]
    fn draw_frame_fills_buffer() {
        let widget = ClockWidget::default();
        let mut frame = vec![0; 120 * 90 * 4];
        widget.draw_frame(
            &mut frame,
            120,
            90,
            1.0,
            &TimeSample::new(10, 10, 30, 0.5),
            &Typeface::Segments,
        );
        assert!(frame.chunks_exact(4).all(|px| px[3] == 0xff));
        assert!(frame.chunks_exact(4).any(|px| px[0] == 0));
    }
}
