use std::path::PathBuf;

use clap::Parser;
use pinata_core::TargetLanguage;

/// Overlay foreign-language vocabulary on a photo
#[derive(Debug, Parser)]
#[command(name = "pinata", version)]
pub struct Cli {
    /// Image to extract vocabulary from
    pub image: PathBuf,

    /// Target language, by name or ISO 639-1 code
    #[arg(short, long)]
    pub language: Option<TargetLanguage>,

    /// Parse a saved model reply instead of calling the API
    #[arg(short, long)]
    pub response: Option<PathBuf>,

    /// Write a snapshot of the composed view to this file
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Profile to load settings from
    #[arg(short, long, default_value = "main")]
    pub profile: String,
}
