//! Command line and environment configuration for the server.

use std::path::PathBuf;

use clap::Parser;

use crate::{Error, timezone::get_local_offset};

/// The web front-end for a personal finance REST API.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Base URL of the finance REST API.
    #[arg(long, env = "FINTRACK_API_URL", default_value = "http://localhost:3000")]
    pub api_url: String,

    /// The port to serve the web app from.
    #[arg(short, long, env = "FINTRACK_PORT", default_value_t = 8080)]
    pub port: u16,

    /// File path where the logged in user is saved between restarts.
    #[arg(long, env = "FINTRACK_SESSION_PATH", default_value = "session.json")]
    pub session_path: PathBuf,

    /// File path for the debug log.
    #[arg(long, env = "FINTRACK_LOG_PATH", default_value = "debug.log")]
    pub log_path: PathBuf,

    /// Canonical timezone name used for default form dates, e.g. "America/Sao_Paulo".
    #[arg(long, env = "FINTRACK_TIMEZONE", default_value = "Etc/UTC")]
    pub timezone: String,
}

impl Config {
    /// Check the values that clap cannot check by itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is not an absolute HTTP(S) URL or the
    /// timezone is not a canonical timezone name.
    pub fn validate(&self) -> Result<(), Error> {
        let url = reqwest::Url::parse(&self.api_url)
            .map_err(|_| Error::InvalidApiUrl(self.api_url.clone()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidApiUrl(self.api_url.clone()));
        }

        if get_local_offset(&self.timezone).is_none() {
            return Err(Error::InvalidTimezoneError(self.timezone.clone()));
        }

        Ok(())
    }
}
