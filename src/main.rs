mod auth;
mod config;
mod history;
mod ledger;
mod logging;
mod models;
mod ops;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbosity = logging::verbosity(&args);
    let (args, config_path) = split_global_flags(args)?;

    let config = config::Config::load(config_path.as_deref())?;
    logging::set_up(verbosity, config.log.filter.as_deref())?;

    let store = ledger::LedgerStore::seeded(chrono::Utc::now());
    match args.len() {
        0 | 1 => {
            let provider = auth::InMemoryProvider::with_demo_users(config.identity);
            debug!(settings = ?provider.settings(), "identity settings loaded");
            let mut app = ui::app::App::new(store, Box::new(provider));
            run::as_shell(&mut app)
        }
        _ => run::as_cli(&args, &store),
    }
}

/// Strip `-v...` and `--config <path>` so subcommands only see their own arguments.
fn split_global_flags(args: Vec<String>) -> Result<(Vec<String>, Option<PathBuf>)> {
    let mut rest = Vec::with_capacity(args.len());
    let mut config = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("Usage: --config <path>")?;
            config = Some(PathBuf::from(path));
        } else if !logging::is_verbosity_flag(&arg) {
            rest.push(arg);
        }
    }
    Ok((rest, config))
}
