//! Command-line interface

pub mod commands;
pub mod output;

use crate::logging::LogLevel;
use clap::{Parser, Subcommand};
use commands::{StagesCommand, ValidateCommand};
use std::ffi::OsString;

/// Configuration-driven pipeline runner
#[derive(Debug, Parser, Clone)]
#[command(name = "chap")]
#[command(version)]
#[command(about = "Run a pipeline of stages described by a YAML configuration", long_about = None)]
pub struct Cli {
    /// Optional subcommand; without one the pipeline is run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input configuration file
    #[arg(long, default_value = "", global = true)]
    pub config: String,

    /// Allow interactive processes
    #[arg(long, global = true)]
    pub interactive: bool,

    /// Logging level
    #[arg(
        long = "log-level",
        value_enum,
        ignore_case = true,
        default_value_t = LogLevel::Info,
        global = true
    )]
    pub log_level: LogLevel,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load the configuration and resolve every stage without executing
    Validate(ValidateCommand),

    /// List registered stages
    Stages(StagesCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
