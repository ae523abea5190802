//! CLI argument parser.
//!
//! Every timestamp field is optional; missing fields are filled from the
//! local wall clock.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ChannelPolicy, StampConfig};
use crate::types::{Meridiem, TimestampInput};

/// Half of the 12-hour clock, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AmPmArg {
    Am,
    Pm,
}

impl From<AmPmArg> for Meridiem {
    fn from(arg: AmPmArg) -> Self {
        match arg {
            AmPmArg::Am => Meridiem::Am,
            AmPmArg::Pm => Meridiem::Pm,
        }
    }
}

/// Log level names accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevelArg::Error => "error",
            LogLevelArg::Warn => "warn",
            LogLevelArg::Info => "info",
            LogLevelArg::Debug => "debug",
            LogLevelArg::Trace => "trace",
        }
    }
}

/// timestamp-voice: assemble a spoken timestamp from recorded snippets
#[derive(Parser, Debug)]
#[command(name = "timestamp-voice")]
#[command(about = "Assemble a spoken timestamp from recorded word snippets")]
#[command(version)]
pub struct Cli {
    /// Hour on the 12-hour clock (1-12)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub hour: Option<u8>,

    /// Minute of the hour (0-59)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=59))]
    pub minute: Option<u8>,

    /// am or pm
    #[arg(long, value_enum)]
    pub ampm: Option<AmPmArg>,

    /// Day of the week, Sunday = 1 through Saturday = 7
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub day: Option<u8>,

    /// Month of the year (1-12)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,

    /// Day of the month (1-31)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=31))]
    pub date: Option<u8>,

    /// Snippet directory or HTTP(S) URL prefix
    #[arg(short, long)]
    pub assets: Option<String>,

    /// Snippet file extension
    #[arg(long)]
    pub ext: Option<String>,

    /// Output WAV file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Play the clip through the default audio output
    #[arg(short, long)]
    pub play: bool,

    /// Per-snippet fetch timeout in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Fail instead of dropping channels when snippets differ in channel count
    #[arg(long)]
    pub strict_channels: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, value_enum, ignore_case = true)]
    pub log_level: Option<LogLevelArg>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The timestamp fields given on the command line.
    pub fn timestamp_input(&self) -> TimestampInput {
        TimestampInput {
            hour: self.hour,
            minute: self.minute,
            ampm: self.ampm.map(Meridiem::from),
            day: self.day,
            month: self.month,
            date: self.date,
        }
    }

    /// Returns true if the clip should be written to a file.
    ///
    /// Export is the default when playback is not requested.
    pub fn should_export(&self) -> bool {
        self.output.is_some() || !self.play
    }

    /// Applies command-line overrides on top of `config`.
    pub fn apply_to(&self, config: &mut StampConfig) {
        if let Some(ref assets) = self.assets {
            config.asset_base = assets.clone();
        }
        if let Some(ref ext) = self.ext {
            config.asset_extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(ref output) = self.output {
            config.output_path = Some(output.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.fetch_timeout_ms = timeout_ms;
        }
        if self.strict_channels {
            config.channel_policy = ChannelPolicy::Strict;
        }
        if let Some(level) = self.log_level {
            config.log_level = level.as_str().to_string();
        }
    }
}
