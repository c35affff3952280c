//! CLI command definitions

use clap::Args;

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Output the configuration in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List registered stages
#[derive(Debug, Args, Clone)]
pub struct StagesCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
