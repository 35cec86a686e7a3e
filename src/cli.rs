use crate::config::{ExtractorOptions, PropmapConfig};
use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "propmap")]
#[command(about = "Extract component prop schemas from TypeScript declarations", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the prop schema of every component under a directory
    Extract {
        /// Root source directory
        source_dir: PathBuf,

        /// Compiler configuration used for module resolution
        #[arg(long, env = "PROPMAP_TSCONFIG")]
        tsconfig: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Constant name used by the `define` format
        #[arg(long = "constant")]
        constant_name: Option<String>,

        /// Log files found, processed and produced
        #[arg(short, long)]
        verbose: bool,
    },

    /// Re-extract changed files into an existing JSON schema
    Update {
        /// Root source directory
        source_dir: PathBuf,

        /// Schema file to update in place
        #[arg(short, long)]
        output: PathBuf,

        /// Compiler configuration used for module resolution
        #[arg(long, env = "PROPMAP_TSCONFIG")]
        tsconfig: Option<PathBuf>,

        /// Log files found, processed and produced
        #[arg(short, long)]
        verbose: bool,

        /// Changed files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Commands::Extract { verbose, .. } | Commands::Update { verbose, .. } => *verbose,
        }
    }
}

/// Merge file configuration with command-line flags; flags win
pub fn build_options(
    source_dir: PathBuf,
    config: &PropmapConfig,
    tsconfig: Option<PathBuf>,
    constant_name: Option<String>,
    verbose: bool,
) -> ExtractorOptions {
    let mut options = ExtractorOptions::new(source_dir).apply_config(config);
    if let Some(tsconfig) = tsconfig {
        options = options.with_tsconfig(tsconfig);
    }
    if let Some(name) = constant_name {
        options = options.with_constant_name(name);
    }
    if verbose {
        options = options.with_verbose(true);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract() {
        let cli = Cli::parse_from([
            "propmap", "extract", "src", "-f", "define", "--constant", "PROPS", "-v",
        ]);
        match cli.command {
            Commands::Extract {
                source_dir,
                format,
                constant_name,
                verbose,
                ..
            } => {
                assert_eq!(source_dir, PathBuf::from("src"));
                assert_eq!(format, OutputFormat::Define);
                assert_eq!(constant_name.as_deref(), Some("PROPS"));
                assert!(verbose);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_update_requires_files() {
        let result = Cli::try_parse_from(["propmap", "update", "src", "-o", "props.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = PropmapConfig {
            tsconfig: Some(PathBuf::from("tsconfig.app.json")),
            constant_name: Some("FROM_FILE".into()),
            verbose: None,
            ignore: None,
        };
        let options = build_options(
            PathBuf::from("src"),
            &config,
            Some(PathBuf::from("tsconfig.build.json")),
            None,
            false,
        );
        assert_eq!(options.tsconfig_path, PathBuf::from("tsconfig.build.json"));
        assert_eq!(options.constant_name, "FROM_FILE");
        assert!(!options.verbose);
    }
}
