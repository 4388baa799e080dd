use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use moodboard::proxy::{self, HttpUpstream, Proxy, ProxyConfig};
use moodboard::rendering::{BoardExporter, DiskSaver, ExportConfig};
use moodboard::sources::{HttpQuoteSource, ProxyImageSource};
use moodboard::{ColorGroup, MoodBoard, MoodBoardConfig, PreviewView, MAX_SIZE};

#[derive(Parser)]
#[command(name = "moodboard", version, about = "Mood board generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the fetch-unsplash proxy (reads ACCESS_KEY from the environment)
    Proxy {
        #[arg(long, default_value = "127.0.0.1:8888")]
        addr: String,
    },
    /// Build a board from random quotes and backgrounds and export it
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Number of cards to pin (at most 9)
    #[arg(long, default_value_t = MAX_SIZE)]
    cards: usize,
    /// Color group for generated backgrounds
    #[arg(long, default_value = "any")]
    group: ColorGroup,
    /// Use photos from the proxy instead of generated colors
    #[arg(long)]
    images: bool,
    /// Directory that receives mood-board.jpg
    #[arg(long, default_value = ".")]
    out: PathBuf,
    #[arg(long)]
    quotes_url: Option<String>,
    #[arg(long)]
    proxy_url: Option<String>,
}

fn run_proxy(addr: &str) -> anyhow::Result<()> {
    let config = ProxyConfig::from_env()?;
    let upstream = HttpUpstream::new(&config)?;
    let server = proxy::bind(addr)?;
    proxy::serve(server, Proxy::new(config, upstream));
    Ok(())
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = MoodBoardConfig::default();
    if let Some(url) = args.quotes_url {
        config.quotes_url = url;
    }
    if let Some(url) = args.proxy_url {
        config.proxy_url = url;
    }

    let mut board = MoodBoard::new(HttpQuoteSource::new(&config)?, ProxyImageSource::new(&config)?);
    board.set_use_image(args.images);
    board.set_color_group(args.group);
    board.start().await;

    if let PreviewView::Error(err) = board.preview() {
        bail!("could not load quotes: {}", err);
    }

    for _ in 0..args.cards.min(MAX_SIZE) {
        if board.add_to_board().await.is_none() {
            log::warn!("skipped a card, preview was not ready");
        }
        board.new_quote();
        board.new_background().await;
    }

    let exporter = BoardExporter::new(ExportConfig::default());
    let path = board
        .export(&exporter, &DiskSaver::new(&args.out))
        .context("export failed, see log for details")?;
    println!("{}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Proxy { addr } => run_proxy(&addr),
        Command::Generate(args) => {
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(generate(args))
        }
    }
}
