use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "vitrine",
    version,
    about = "A terminal storefront showing one featured product per subcategory",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Storefront API base URL.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Storefront origin used to open product pages.
    #[arg(long, value_name = "URL")]
    pub storefront_url: Option<String>,

    /// Viewport width to lay out for instead of the terminal width.
    #[arg(long, value_name = "PX")]
    pub viewport_width: Option<u32>,

    /// Ignore the cached result and fetch fresh data.
    #[arg(long)]
    pub refresh: bool,

    /// Directory of the result cache.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,
}
