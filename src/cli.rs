use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneName {
    /// Diffuse sphere resting on a diffuse ground
    Basic,
    /// Diffuse, hollow glass and fuzzy metal spheres with depth of field
    Materials,
    /// Two touching spheres filling a 90 degree field of view
    Fov,
    /// Randomized field of small spheres around three large ones
    Final,
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "raylight")]
#[command(about = "A small Monte Carlo path tracer for sphere scenes")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "basic")]
    pub scene: SceneName,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels (scene default when omitted)
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel (scene default when omitted)
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum number of bounces per camera ray (scene default when omitted)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output path: `-` streams PPM to stdout, `.ppm` writes PPM, `.png` writes PNG
    #[arg(short, long, default_value = "-")]
    pub output: String,
}
