//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// logdemux - demultiplexes a framed log stream into per-channel files
#[derive(Parser, Debug)]
#[command(
    name = "logdemux",
    author,
    version,
    about = "Log stream demultiplexing sidecar",
    long_about = "Reads length-prefixed log records from a named byte stream and\n\
                  appends each record's payload to one of two files selected by\n\
                  its channel tag (stdout / stderr)."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "LOGDEMUX_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "LOGDEMUX_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Forward one stream until interrupted
    Forward(ForwardArgs),
}

/// Arguments for the `forward` command
#[derive(Parser, Debug, Clone)]
pub struct ForwardArgs {
    /// FIFO to read framed records from; its path is the session identifier
    pub fifo: PathBuf,

    /// Destination file for stdout-tagged payloads
    #[arg(long)]
    pub stdout: Option<PathBuf>,

    /// Destination file for stderr-tagged payloads
    #[arg(long)]
    pub stderr: Option<PathBuf>,

    /// Extra session options as KEY=VALUE (override file and flags)
    #[arg(short = 'o', long = "opt", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// JSON file holding the full session option map
    #[arg(long, value_name = "FILE")]
    pub options_file: Option<PathBuf>,

    /// Serve Prometheus metrics on this port
    #[arg(long, env = "LOGDEMUX_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Log output format choices
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => observability::LogFormat::Compact,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Json => observability::LogFormat::Json,
        }
    }
}
