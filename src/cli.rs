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

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumenpath")]
#[command(about = "A Monte Carlo path tracer for spherical scenes")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600", help = "Image height in pixels")]
    pub height: u32,

    /// Maximum recursion depth for bounce rays
    #[arg(long, short = 'd', default_value = "3", help = "Maximum recursion depth for bounce rays")]
    pub depth: u32,

    /// Number of indirect samples per bounce
    #[arg(long, short = 's', default_value = "16", help = "Number of indirect samples per bounce")]
    pub indirect_samples: u32,

    /// Scene description file (JSON); a randomized demo scene is rendered if omitted
    #[arg(long, help = "Scene description file (JSON); a randomized demo scene is rendered if omitted")]
    pub scene: Option<String>,

    /// Output file path (.png for 8-bit tone-mapped, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png", help = "Output file path (.png for 8-bit tone-mapped, .exr for HDR linear)")]
    pub output: String,
}
