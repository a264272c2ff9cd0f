use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_mosaic::{
    cli::{self, GenerateRequest},
    config, error,
    mosaic::{MosaicOptions, fetcher::POOL_WIDTH},
    set_verbose,
    types::{Arrangement, ResolutionTier},
    utils,
};

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
  args_conflicts_with_subcommands = true,
  subcommand_negates_reqs = true,
)]
struct Cli {
    /// Spotify playlist URI, URL or ID
    #[clap(required = true)]
    playlist: Option<String>,

    /// Mosaic's side length in tiles
    #[clap(
        short,
        long = "tiles",
        value_parser = clap::value_parser!(u32).range(1..=128),
        default_value_t = 2
    )]
    tiles: u32,

    /// Output image file path; the extension picks the format
    #[clap(short, long = "out", default_value = "mosaic.png")]
    out: PathBuf,

    /// Randomize which artworks are used (same as --arrange random)
    #[clap(short, long, conflicts_with = "arrange")]
    shuffle: bool,

    /// Which artworks to use when there are more than the grid holds
    #[clap(short, long, value_enum, default_value_t = Arrangement::First)]
    arrange: Arrangement,

    /// Seed for the random arrangement
    #[clap(long)]
    seed: Option<u64>,

    /// Resolution of one artwork in pixels (64, 300 or 640)
    #[clap(
        short,
        long = "resolution",
        value_parser = utils::parse_resolution,
        default_value = "640"
    )]
    resolution: ResolutionTier,

    /// Blur the mosaic, from 0.0 to 4.0; 1.0 blurs with half a tile's size
    #[clap(long, value_parser = utils::parse_blur, default_value = "0.0")]
    blur: f32,

    /// Spotify client ID and secret delimited by a colon
    #[clap(long = "creds", value_name = "CLIENT_ID:CLIENT_SECRET", value_parser = utils::parse_credentials)]
    credentials: Option<(String, String)>,

    /// Print all logs
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Get shell completions
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Command::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    set_verbose(cli.verbose);

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let Some(playlist) = cli.playlist else {
        error!("A playlist URI, URL or ID is required");
    };

    let arrangement = if cli.shuffle {
        Arrangement::Random
    } else {
        cli.arrange
    };

    let request = GenerateRequest {
        playlist,
        credentials: cli.credentials,
        options: MosaicOptions {
            tiles: cli.tiles,
            tier: cli.resolution,
            arrangement,
            seed: cli.seed,
            blur: cli.blur,
            output: Some(cli.out),
            pool_width: POOL_WIDTH,
            show_progress: true,
        },
    };

    if let Err(e) = cli::generate(request).await {
        error!("{}", e);
    }
}
