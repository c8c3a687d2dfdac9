//! thoughts CLI tool
//!
//! Command-line interface for inspecting assistant thought payloads with thought-core.
//!
//! ## Commands
//!
//! - `parse [path]`: Parse a payload file (or stdin) and print the thought blocks as JSON
//! - `init-config [path]`: Write the default parse options to a TOML file
//!
//! By default the whole input is treated as a single thought. With `--json` the input is read as a
//! JSON value instead, so a captured chat API response field such as `["...", "..."]` can be fed
//! in directly.

use clap::{Parser, Subcommand};
use std::{
    io::{self, Read},
    path::PathBuf,
};
use thought_core::{
    config::{get_content, OptionsProvider, ParseOptions, TomlConfigProvider},
    ThoughtInput, ThoughtParser,
};

#[derive(Parser)]
#[command(name = "thoughts")]
#[command(author, version, about = "A tool for parsing assistant thought payloads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a thought payload and print the resulting blocks
    Parse {
        /// Payload file; reads stdin when omitted or `-`
        path: Option<PathBuf>,

        /// Treat the input as a JSON value (string or array of strings)
        #[arg(long)]
        json: bool,

        /// Parse options TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the default parse options to a TOML file
    InitConfig {
        /// Where to write the options file
        #[arg(default_value = "thoughts.toml")]
        path: PathBuf,
    },
}

fn read_input(path: Option<PathBuf>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(path) if path.as_os_str() != "-" => Ok(get_content(path)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Parse { verbose: true, .. } => "debug",
        _ => "info",
    };
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Parse {
            path,
            json,
            config,
            pretty,
            verbose: _,
        } => {
            let options = match config {
                Some(config_path) => TomlConfigProvider::new(config_path).get_options()?,
                None => ParseOptions::default(),
            };
            let text = read_input(path)?;
            let input = if json {
                ThoughtInput::from(serde_json::from_str::<serde_json::Value>(&text)?)
            } else {
                ThoughtInput::from(text)
            };

            let blocks = ThoughtParser::new(options).parse(input);
            tracing::info!("Parsed {} thought blocks", blocks.len());
            let output = if pretty {
                serde_json::to_string_pretty(&blocks)?
            } else {
                serde_json::to_string(&blocks)?
            };
            println!("{output}");
            Ok(())
        }

        Commands::InitConfig { path } => {
            if path.exists() {
                eprintln!("Error: {} already exists", path.display());
                std::process::exit(1);
            }
            TomlConfigProvider::new(path.clone()).set_options(&ParseOptions::default())?;
            println!("✓ Parse options written: {}", path.display());
            Ok(())
        }
    }
}
