//! Global command line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::scanner::types::Platform;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "gatescan",
    about = "QR ticket scanning and validation console",
    version
)]
pub struct Args {
    /// Configuration file (default: <config dir>/Gatescan/gatescan.toml)
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Primary ("regular") validation endpoint URL
    #[arg(long, value_name = "URL")]
    pub primary_url: Option<String>,

    /// Secondary ("cash") validation endpoint URL
    #[arg(long, value_name = "URL")]
    pub secondary_url: Option<String>,

    /// Per-request validation timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Camera device id to bind instead of the default selection
    #[arg(long, value_name = "ID")]
    pub device: Option<String>,

    /// Platform the console runs on; affects remediation wording only
    #[arg(long, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<String>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformArg {
    Mobile,
    Desktop,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Mobile => Platform::Mobile,
            PlatformArg::Desktop => Platform::Desktop,
        }
    }
}
