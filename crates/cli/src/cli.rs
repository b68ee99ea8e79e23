use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{generate_command, init_command};
use crate::display::print_report;

#[derive(Parser, Debug)]
#[command(name = "mapmap")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate implementations for traits marked with `// mapmap:assembler`
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),
    /// Write a default .mapmap.json configuration
    Init {
        /// Custom working directory (defaults to current directory)
        #[arg(long = "cwd")]
        cwd: Option<PathBuf>,

        /// Force overwrite an existing configuration file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Rust file to scan
    #[arg(short = 'f', long = "file", conflicts_with = "dir", required_unless_present = "dir")]
    pub file: Option<PathBuf>,

    /// Directory to scan recursively for Rust files
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Output directory for generated files (falls back to `output_dir` in the config)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Package root containing Cargo.toml (defaults to the nearest one above the input)
    #[arg(long = "crate-root")]
    pub crate_root: Option<PathBuf>,

    /// Match `use` paths by exact segment and reject ambiguous imports
    #[arg(long = "strict-deps")]
    pub strict_deps: bool,

    /// Configuration file (defaults to .mapmap.json or mapmap.json above the working directory)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Generate(args) => {
                let json = args.json;
                let report = generate_command(&args)?;
                print_report(&report, json)
            }
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
        }
    }
}
