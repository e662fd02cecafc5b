//! # CLI Module
//!
//! Command-line front end for plrec. Every command builds a
//! [`Services`](crate::service::Services) from the environment, runs one
//! step of the fetch, analyze and recommend pipeline and prints the result
//! as colored log lines and tables.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify login through the PKCE flow, persisted for later runs
//! - [`validate`] - Checks that a playlist URL resolves and is long enough
//! - [`analyze`] - Prints artist, album and audio feature statistics
//! - [`recommend`] - Prints recommended tracks for a playlist
//! - [`serve`] - Runs the web front end
//!
//! ## Usage
//!
//! ```bash
//! plrec auth
//! plrec validate https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! plrec analyze https://music.youtube.com/playlist?list=PL4fGSI1pDJn6jXS_Tv_N9B8Z0HTRVJE0m
//! plrec recommend https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M --count 20
//! plrec serve --address 0.0.0.0:5000
//! ```
//!
//! Commands that fail print a red error line and exit with status 1.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod analyze;
mod auth;
mod recommend;
mod serve;
mod validate;

pub use analyze::{analyze, print_analysis};
pub use auth::auth;
pub use recommend::recommend;
pub use serve::serve;
pub use validate::validate;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
