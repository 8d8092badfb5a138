// File: args.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use mp4_track::TrackFlag;
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum)]
pub enum LogLevel {
    Trace = 0, // Every visited box.
    Debug = 1, // Every extracted track.
    Info = 2, // Every write.
    Warn = 3, // Tolerated anomalies in the file.
    Error = 4, // Failures only.
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum FlagArg {
    Default,
    Forced,
}

impl From<FlagArg> for TrackFlag {
    fn from(flag: FlagArg) -> Self {
        match flag {
            FlagArg::Default => TrackFlag::Default,
            FlagArg::Forced => TrackFlag::Forced,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = "Lists and edits the default/forced flags of MP4 tracks in place.")]
pub struct Args {
    #[arg(short, long, default_value = "warn", global = true)]
    pub log_level: LogLevel,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tracks of a file
    List {
        file: PathBuf,
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
    /// Set a flag on a track
    Set {
        file: PathBuf,
        track_id: u32,
        #[arg(default_value = "default")]
        flag: FlagArg,
    },
    /// Clear a flag on a track
    Unset {
        file: PathBuf,
        track_id: u32,
        #[arg(default_value = "default")]
        flag: FlagArg,
    },
}

impl Command {
    pub fn file(&self) -> &PathBuf {
        match self {
            Command::List { file, .. } | Command::Set { file, .. } | Command::Unset { file, .. } => file,
        }
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn get_log_level_filter(args: &Args) -> LevelFilter {
    // Map the LogLevel enum to the LevelFilter enum
    match args.log_level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
    }
}
