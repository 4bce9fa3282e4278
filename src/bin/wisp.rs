//! Open a window with the smoke effect.
//!
//! ```text
//! wisp --texture assets/smoke.png --pool-size 80 -v
//! wisp --config smoke.json
//! ```

use std::path::PathBuf;

use clap::Parser;
use wisp::window::{self, WindowOptions};
use wisp::{SmokeConfig, SmokeError, TextureSource};

#[derive(Parser, Debug)]
#[command(name = "wisp", version, about = "Rising smoke particle field")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Texture path or http(s) URL
    #[arg(short, long)]
    texture: Option<String>,

    /// Use the built-in procedural puff instead of an image
    #[arg(long, conflicts_with = "texture")]
    procedural: bool,

    /// Number of particles
    #[arg(short = 'n', long)]
    pool_size: Option<usize>,

    /// RNG seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,

    /// Initial window width
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), SmokeError> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &cli.config {
        Some(path) => SmokeConfig::load(path)?,
        None => SmokeConfig::default(),
    };
    if let Some(texture) = &cli.texture {
        config.texture = TextureSource::parse(texture);
    }
    if cli.procedural {
        config.texture = TextureSource::Procedural { size: 256 };
    }
    if let Some(pool_size) = cli.pool_size {
        config.field.pool_size = pool_size;
    }
    if let Some(seed) = cli.seed {
        config.field.seed = Some(seed);
    }

    log::info!(
        "Starting wisp: {} particles, texture {}",
        config.field.pool_size,
        config.texture
    );

    window::run(
        config,
        WindowOptions {
            title: "wisp".to_string(),
            width: cli.width,
            height: cli.height,
        },
    )
}
