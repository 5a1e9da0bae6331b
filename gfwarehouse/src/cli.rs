//! Command-line interface definition and parsing.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the warehouse server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// The HMAC secret used to sign and verify access tokens.
    #[arg(short, long, env = "ACCESS_TOKEN_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Write the OpenAPI document to this path and exit.
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments, falling back to the environment and to
    /// a `.env` file in the working directory or its parents.
    pub fn import() -> Result<Self, clap::Error> {
        // Attempt to load a .env file, but don't sweat it if one is not found.
        let _ = dotenvy::dotenv();
        Self::try_parse()
    }
}
