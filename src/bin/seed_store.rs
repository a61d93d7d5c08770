//! Build (or extend) a limit store from a curation JSON file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lhctodd::config::{Config, DATA_DIR_ENV};
use lhctodd::data::loader::load_curation;
use lhctodd::data::store::LimitStore;

#[derive(Parser)]
#[command(name = "seed-store")]
#[command(about = "Write curated direct-detection limits into the LMDB limit store", long_about = None)]
struct Cli {
    /// Curation file: a JSON array of {id, cite, year, type, expr, name, limit}
    #[arg(short, long)]
    input: PathBuf,

    /// Data directory holding `darkmatter-data`
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::resolve(cli.data_dir.as_deref());
    let store_path = config.store_path();
    std::fs::create_dir_all(&store_path)
        .with_context(|| format!("creating {}", store_path.display()))?;

    let limits = load_curation(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    let store = LimitStore::open(&store_path, false)?;
    for lim in &limits {
        store
            .put(lim.id, &lim.limit, &lim.meta())
            .with_context(|| format!("writing limit {}", lim.id))?;
    }

    log::info!("Wrote {} limits to {}", limits.len(), store_path.display());
    Ok(())
}
