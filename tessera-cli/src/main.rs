//! Tessera CLI - Serialize reflection models to plain JSON.
//!
//! # Commands
//!
//! - `tessera init` - Initialize a new configuration file
//! - `tessera serialize` - Serialize the configured model
//!
//! # Usage
//!
//! ```bash
//! tessera init
//! tessera serialize --input build/model.json --output docs/api.json
//! ```

use clap::{Parser, Subcommand};
use tessera_cli::CliError;
use tessera_cli::commands::{self, InitOptions, SerializeOptions};
use tessera_cli::output;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Tessera - Serialize reflection models to plain JSON
#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new tessera.yaml configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short)]
        output: Option<String>,

        /// Overwrite existing configuration file
        #[arg(long, short)]
        force: bool,
    },

    /// Serialize the reflection model to JSON
    Serialize {
        /// Path to the configuration file
        #[arg(long, short)]
        config: Option<String>,

        /// Override the model file (.json, .yaml, .yml)
        #[arg(long, short)]
        input: Option<String>,

        /// Override the output file path
        #[arg(long, short)]
        output: Option<String>,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Show detailed progress and debug logs
        #[arg(long, short, conflicts_with = "quiet")]
        verbose: bool,

        /// Only print errors
        #[arg(long, short)]
        quiet: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), CliError> = match cli.command {
        Commands::Init { output, force } => {
            init_tracing(false);
            commands::run_init(InitOptions { output, force }).map_err(CliError::from)
        }
        Commands::Serialize {
            config,
            input,
            output,
            compact,
            verbose,
            quiet,
        } => {
            init_tracing(verbose);
            output::set_quiet(quiet);
            output::set_verbosity(u8::from(verbose));

            let options = SerializeOptions {
                config,
                input,
                output,
                compact,
            };
            commands::run_serialize(options)
                .map(|_| ())
                .map_err(CliError::from)
        }
    };

    if let Err(e) = result {
        output::error(&e.format_for_cli());
        std::process::exit(1);
    }
}
