use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "ghostjob",
    version,
    about = "Heuristic ghost job listing detector"
)]
pub struct Args {
    /// JSON file holding lists, threshold and display settings
    #[arg(long, global = true, default_value = "ghostjob.json")]
    pub settings: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score a listing saved as plain text
    Score(ScoreArgs),

    #[command(flatten)]
    Lists(ListCommand),
}

/// Company list and threshold management.
#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Add a company to the trusted list
    Trust { name: String },

    /// Remove a company from the trusted list
    Untrust { name: String },

    /// Add a company to the blocked list
    Block { name: String },

    /// Remove a company from the blocked list
    Unblock { name: String },

    /// Show both company lists and the threshold
    #[command(name = "lists")]
    Show,

    /// Print the lists and threshold as JSON
    Export {
        /// Write output to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Merge lists and threshold from an exported JSON file
    Import { path: PathBuf },

    /// Show the ghost threshold, or set it (0-100)
    Threshold { value: Option<String> },
}

#[derive(Debug, clap::Args)]
pub struct ScoreArgs {
    /// Path to the listing text
    pub listing_path: PathBuf,

    /// Company name, as a job board would show it on the card
    #[arg(long)]
    pub company: Option<String>,

    /// Override the stored ghost threshold
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// Override the stored rule profile
    #[arg(long)]
    pub profile: Option<ProfileArg>,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Optional git commit hash for tool metadata
    #[arg(long)]
    pub commit: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    Standard,
    Basic,
}
