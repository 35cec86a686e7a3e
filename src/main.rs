use anyhow::{Context, Result};
use clap::Parser;
use propmap::cli::{build_options, Cli, Commands};
use propmap::config::load_config;
use propmap::engine::Engine;
use propmap::io::{load_schema, write_output, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config();
    init_logging(cli.command.verbose() || config.verbose.unwrap_or(false));

    match cli.command {
        Commands::Extract {
            source_dir,
            tsconfig,
            output,
            format,
            constant_name,
            verbose,
        } => {
            let options = build_options(source_dir, &config, tsconfig, constant_name, verbose);
            let constant_name = options.constant_name.clone();
            let mut engine = Engine::new(options);
            engine.build().context("Failed to extract component props")?;
            write_output(engine.schema(), format, &constant_name, output.as_deref())
                .context("Failed to write output")?;
        }
        Commands::Update {
            source_dir,
            output,
            tsconfig,
            verbose,
            files,
        } => {
            let options = build_options(source_dir, &config, tsconfig, None, verbose);
            let existing = load_schema(&output)
                .with_context(|| format!("Failed to load {}", output.display()))?;
            let constant_name = options.constant_name.clone();
            let mut engine = Engine::with_schema(options, existing);
            engine
                .update(&files)
                .context("Failed to update component props")?;
            write_output(engine.schema(), OutputFormat::Json, &constant_name, Some(&output))
                .context("Failed to write output")?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}
