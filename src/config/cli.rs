use crate::domain::model::OutputFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "phaselist")]
#[command(version)]
#[command(about = "List predicted seismic phase arrival times at a station for an event")]
#[command(
    after_help = "Examples:\n  phaselist 2015-11-30T09:49:13 42.74695 -84.39015 36.737 -98.006 5.00\n  phaselist 2015-11-30T09:49:13 NHBP 36.737 -98.006 5.00\n\nOptions go before the positional values. With no or invalid arguments the values are asked for interactively."
)]
pub struct CliConfig {
    /// ORIGIN_TIME STLAT STLON EVLAT EVLON DEPTH, or ORIGIN_TIME STATION EVLAT EVLON DEPTH
    // 格式錯誤的值 (如 -98,006) 也要交給參數解析，再轉互動輸入
    #[arg(value_name = "PARAMS", allow_negative_numbers = true, allow_hyphen_values = true)]
    pub params: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Reference earth model (iasp91, ak135, ak135f, prem, jb, herrin, sp6)
    #[arg(long)]
    pub model: Option<String>,

    /// Travel-time service endpoint
    #[arg(long)]
    pub engine_url: Option<String>,

    /// Ray-path service endpoint (TauP path text output)
    #[arg(long)]
    pub path_url: Option<String>,

    /// CSV file with extra stations (name,latitude,longitude)
    #[arg(long)]
    pub stations: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also request ray paths for the common phases
    #[arg(long)]
    pub ray_paths: bool,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
