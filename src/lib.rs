//! Playlist analysis and recommendation library
//!
//! This library fetches Spotify and YouTube Music playlists, computes simple
//! descriptive statistics over their tracks and recommends further tracks
//! from the artists that appear most often. It powers both the `plrec` web
//! server and its companion command-line interface.
//!
//! # Modules
//!
//! - `analysis` - Frequency counting and averaging over a playlist's tracks
//! - `api` - HTTP endpoints served by the web front end
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error categories surfaced to users
//! - `management` - Persisted Spotify user token handling
//! - `playlist` - Playlist URL parsing and platform detection
//! - `provider` - The contract shared by both provider clients
//! - `recommend` - Candidate pool and the top-tracks recommendation run
//! - `server` - HTTP server wiring
//! - `service` - The fetch, analyze and recommend pipeline
//! - `spotify` - Spotify Web API client
//! - `youtube` - YouTube Data API client used for YouTube Music playlists
//! - `types` - Data structures shared across modules
//! - `utils` - PKCE and text helpers
//!
//! # Example
//!
//! ```
//! use plrec::{config, service::Services};
//!
//! #[tokio::main]
//! async fn main() -> plrec::Result<()> {
//!     config::load_env().await;
//!     let services = Services::from_env();
//!     let report = services
//!         .recommend("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M", Some(10))
//!         .await?;
//!     println!("{} recommendations", report.recommendations.len());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod playlist;
pub mod provider;
pub mod recommend;
pub mod server;
pub mod service;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod youtube;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Starting server on {}", addr);
/// info!("Fetched {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when operations complete successfully.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the CLI uses this; request
/// handlers never exit the process.
///
/// # Example
///
/// ```
/// error!("Failed to bind {}", addr);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as an artist lookup that failed while
/// the rest of a recommendation run carries on.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a dimmed diagnostic message when `PLREC_DEBUG` is enabled.
///
/// The check happens at every call so the flag can be flipped through the
/// `.env` file without rebuilding.
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if $crate::config::debug_enabled() {
      use colored::Colorize;
      println!("[{}] {}", "~".dimmed(), std::format_args!($($arg)*));
    }
  })
}
