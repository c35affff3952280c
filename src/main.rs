use anyhow::{Context, Result};
use chap::cli::commands::{StagesCommand, ValidateCommand};
use chap::cli::output::*;
use chap::cli::{Cli, Command};
use chap::core::{PipelineConfig, StageRegistry};
use chap::execution::{RunOptions, Runner};
use chap::logging::LoggingContext;
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let logging = LoggingContext::new(cli.log_level);
    logging
        .install_global()
        .context("Failed to set logging subscriber")?;

    let registry = StageRegistry::with_builtins();

    // Execute command
    match &cli.command {
        None => run_pipeline(&cli, &registry, &logging)?,
        Some(Command::Validate(cmd)) => validate_pipeline(cmd, &cli, &registry, &logging)?,
        Some(Command::Stages(cmd)) => list_stages(cmd, &registry)?,
    }

    Ok(())
}

fn run_options(cli: &Cli) -> RunOptions {
    RunOptions {
        config: PathBuf::from(&cli.config),
        interactive: cli.interactive,
    }
}

fn run_pipeline(cli: &Cli, registry: &StageRegistry, logging: &LoggingContext) -> Result<()> {
    let outcome = Runner::new(registry, logging)
        .run(&run_options(cli))
        .with_context(|| format!("Pipeline from '{}' failed", cli.config))?;

    println!("{}", format_run_summary(&outcome.pipeline.state));
    Ok(())
}

fn validate_pipeline(
    cmd: &ValidateCommand,
    cli: &Cli,
    registry: &StageRegistry,
    logging: &LoggingContext,
) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    let runner = Runner::new(registry, logging);
    let options = run_options(cli);
    let config: PipelineConfig = runner
        .load(&options)
        .context("Failed to load pipeline config")?;
    let pipeline = runner
        .assemble(&config, options.interactive)
        .context("Failed to resolve pipeline stages")?;

    println!("{}", format_pipeline(&pipeline));

    if cmd.json {
        let json = serde_json::to_string_pretty(&config)?;
        println!("\n{}", json);
    }

    Ok(())
}

fn list_stages(cmd: &StagesCommand, registry: &StageRegistry) -> Result<()> {
    let listing = registry.list();

    if cmd.json {
        let stages: Vec<String> = listing
            .iter()
            .flat_map(|(group, stages)| stages.iter().map(move |s| format!("{}.{}", group, s)))
            .collect();
        let data = serde_json::json!({ "stages": stages });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("{} Registered stages ({}):", INFO, style(registry.len()).cyan());
    println!("{}", format_stage_listing(&listing));
    Ok(())
}
