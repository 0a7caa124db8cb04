//! [`Args`] definitions.

use std::path::PathBuf;

use clap::Parser;

/// Inspector of serialized authentication tokens.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "inspector.toml")]
    pub config: String,

    /// Path to the JSON-serialized token. Read from STDIN if omitted.
    pub token: Option<PathBuf>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
