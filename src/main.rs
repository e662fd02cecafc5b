use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plrec::{cli, config};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web front end
    Serve(ServeOptions),

    /// Check that a playlist URL resolves and has enough tracks
    Validate(PlaylistOptions),

    /// Show artist, album and audio feature statistics for a playlist
    Analyze(PlaylistOptions),

    /// Recommend tracks from the playlist's most frequent artists
    Recommend(RecommendOptions),

    /// Log in to Spotify
    Auth,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on, defaults to SERVER_ADDRESS or 127.0.0.1:5000
    #[clap(long)]
    pub address: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Spotify or YouTube Music playlist URL
    pub url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Spotify or YouTube Music playlist URL
    pub url: String,

    /// Number of recommendations (1-50)
    #[clap(long, short = 'n')]
    pub count: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    config::load_env().await;

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => cli::serve(opt.address).await,
        Command::Validate(opt) => cli::validate(&opt.url).await,
        Command::Analyze(opt) => cli::analyze(&opt.url).await,
        Command::Recommend(opt) => cli::recommend(&opt.url, opt.count).await,
        Command::Auth => cli::auth().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
