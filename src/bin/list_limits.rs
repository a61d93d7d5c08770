//! Print the limits in the store as a table.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lhctodd::config::{Config, DATA_DIR_ENV};
use lhctodd::data::store::with_store;
use lhctodd::listing::render_table;

#[derive(Parser)]
#[command(name = "list-limits")]
#[command(about = "List the direct-detection limits available in the store", long_about = None)]
struct Cli {
    /// Only show limits with a metadata field containing this text
    #[arg(short, long)]
    search: Option<String>,

    /// Data directory holding `darkmatter-data`
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::resolve(cli.data_dir.as_deref());
    let rows = with_store(&config.store_path(), |store| store.list_all(cli.search.as_deref()))?;

    println!("{}", render_table(&rows));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_dir_flag_is_parsed() {
        let cli = Cli::try_parse_from(["list-limits", "--data-dir", "/tmp/dd", "-s", "XENON"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/dd")));
        assert_eq!(cli.search.as_deref(), Some("XENON"));
    }
}
