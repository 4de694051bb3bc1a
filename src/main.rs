use anyhow::{Context, Result};
use dump_migrate::cli::commands::{InspectCommand, RunCommand, ValidateCommand};
use dump_migrate::cli::output::*;
use dump_migrate::cli::{Cli, Command};
use dump_migrate::core::MigrationConfig;
use dump_migrate::dump::{inspect, DumpDocument};
use dump_migrate::execution::{MigrationEngine, StageEvent};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_migration(cmd, &cli)?,
        Command::Validate(cmd) => validate_config(cmd, &cli)?,
        Command::Inspect(cmd) => inspect_dump(cmd, &cli)?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<MigrationConfig> {
    match &cli.config {
        Some(path) => MigrationConfig::from_file(path)
            .with_context(|| format!("Failed to load migration config {}", path)),
        None => Ok(MigrationConfig::default()),
    }
}

fn run_migration(cmd: &RunCommand, cli: &Cli) -> Result<()> {
    let mut config = load_config(cli)?;
    cmd.apply_overrides(&mut config);
    let schema_script = config.schema_script.clone();

    let mut engine = MigrationEngine::new(config).context("Invalid migration config")?;

    let spinner = create_stage_spinner();
    let progress = spinner.clone();
    engine.add_event_handler(move |event| {
        if let StageEvent::StageStarted { stage } = event {
            progress.set_message(stage_message(*stage));
        }
        if let Some(line) = format_stage_event(event) {
            progress.suspend(|| println!("{}", line));
        }
    });

    let result = if cmd.dry_run { engine.plan() } else { engine.run() };
    spinner.finish_and_clear();

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            // The failure line was already printed from the RunFailed event
            debug!("{:?}", e);
            if cmd.fail_on_error {
                std::process::exit(1);
            }
            return Ok(());
        }
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&output.summary)?);
        return Ok(());
    }

    println!();
    println!("{} Summary:", INFO);
    for group in &output.summary.groups {
        println!("{}", format_group_summary(group));
    }
    if output.summary.written {
        println!("{}", format_instructions(&output.summary, &schema_script));
    }

    Ok(())
}

fn validate_config(cmd: &ValidateCommand, cli: &Cli) -> Result<()> {
    println!("{} Validating migration config...", INFO);

    let result = load_config(cli).and_then(|config| {
        config.validate()?;
        Ok(config)
    });

    match result {
        Ok(config) => {
            println!("{} Migration configuration is valid!", CHECK);
            println!("  Input: {}", style(config.input_path.display()).bold());
            println!("  Output: {}", style(config.output_path.display()).bold());
            println!("  Cutoff: {}", style(config.cutoff).cyan());
            println!("  Groups: {}", style(config.groups.len()).cyan());
            println!("  Renames: {}", style(config.rename_rules()?.len()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}

fn inspect_dump(cmd: &InspectCommand, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let input = cmd.input.clone().unwrap_or(config.input_path);

    let dump = DumpDocument::load(&input)
        .with_context(|| format!("Failed to read dump {}", input.display()))?;
    let inventory = inspect(&dump.text);

    if cmd.json {
        let data = serde_json::json!({ "input": input, "tables": inventory });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    if inventory.is_empty() {
        println!("{} No INSERT statements found in {}", WARN, input.display());
        return Ok(());
    }

    println!("{} INSERT statements in {}:", INFO, style(input.display()).bold());
    for entry in &inventory {
        println!("{}", format_inventory_row(entry));
    }

    Ok(())
}
