//! compactgen CLI - Schema-driven serializer generator
//!
//! Commands:
//! - `compactgen generate` - Generate Java or Rust serializers from a schema
//! - `compactgen check` - Validate a schema and print its emission order

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod check;
mod exit_code;
mod generate;
mod logging;

#[derive(Parser)]
#[command(name = "compactgen")]
#[command(author, version, about = "Generate compact serializers from a schema", long_about = None)]
struct Cli {
    /// Log filter, e.g. `info` or `compactgen_core=debug` (default: RUST_LOG, then warn)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate serializers for every type in a schema
    Generate {
        /// Path to the root schema file (.yaml, .yml or .json)
        schema: PathBuf,

        /// Target language (java, rust); overrides the config file
        #[arg(short, long)]
        language: Option<String>,

        /// Output directory; overrides the config file (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Path to compactgen.toml (default: next to the schema, if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Do not print the summary and registration hints
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a schema and print its emission order with fingerprints
    Check {
        /// Path to the root schema file
        schema: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.log_level.as_deref()) {
        eprintln!("error: {err:#}");
        return ExitCode::from(exit_code::OTHER);
    }

    let result = match cli.command {
        Commands::Generate {
            schema,
            language,
            output_dir,
            config,
            quiet,
        } => generate::run(generate::GenerateArgs {
            schema,
            language,
            output_dir,
            config,
            quiet,
        }),
        Commands::Check { schema } => check::run(&schema),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code::for_error(&err))
        }
    }
}
