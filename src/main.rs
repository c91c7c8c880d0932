use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dialclock::{load_font, ClockConfig, ClockWidget, HandStyle};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Standard,
    Gradient,
    Tapered,
    Shadowed,
}

impl From<StyleArg> for HandStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Standard => HandStyle::Standard,
            StyleArg::Gradient => HandStyle::Gradient,
            StyleArg::Tapered => HandStyle::Tapered,
            StyleArg::Shadowed => HandStyle::Shadowed,
        }
    }
}

/// Shows an animated analog clock.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Window title
    #[arg(long, default_value = "Analog Clock")]
    title: String,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Stroke style for the hands
    #[arg(long, value_enum, default_value_t = StyleArg::Standard)]
    style: StyleArg,

    /// Milliseconds between clock samples
    #[arg(long, default_value_t = 11)]
    interval_ms: u64,

    /// Space between the dial and the window edge, in logical pixels
    #[arg(long, default_value_t = 36.0)]
    margin: f64,

    /// TrueType/OpenType font for the numerals
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let font_data = args
        .font
        .as_ref()
        .map(load_font)
        .transpose()
        .context("loading numeral font")?;

    let config = ClockConfig::builder()
        .title(args.title)
        .window_width(args.width)
        .window_height(args.height)
        .hand_style(args.style.into())
        .redraw_interval(Duration::from_millis(args.interval_ms))
        .dial_margin(args.margin)
        .maybe_font_data(font_data)
        .build();

    ClockWidget::new(config)
        .show()
        .context("running clock window")?;

    Ok(())
}
