//! Command-line interface
//!
//! Without a subcommand the window opens; subcommands manage settings.

mod commands;
pub mod output;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

/// QR Tool - turn text into a QR code image
#[derive(Parser, Debug)]
#[command(name = "qrtool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Text to prefill the input field with
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable trace-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run a CLI subcommand
pub async fn run(command: Commands, output: &OutputOptions) -> anyhow::Result<()> {
    let format = output.format();

    match command {
        Commands::Config { command } => commands::config::run(command, format, output.quiet).await,
    }
}
