//! tn-bot: plays the transit-network game over stdin/stdout.
//!
//! Reads one turn snapshot at a time from stdin (see [`feed`] for the line
//! format) and prints one action line per turn.  Logging goes to stderr at
//! the level named by `TN_LOG` (default `warn`).
//!
//! ```text
//! tn-bot [--config engine.json] < turns.txt
//! ```

mod config;
mod feed;
mod logger;
mod render;

#[cfg(test)]
mod tests;

use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};

use tn_core::EngineConfig;
use tn_engine::{Engine, LogObserver};

use config::{config_path, load_config};
use feed::FeedReader;
use render::render;

fn main() -> Result<()> {
    logger::init();

    let config = match config_path(std::env::args().skip(1))? {
        Some(path) => load_config(Path::new(&path))?,
        None => EngineConfig::default(),
    };
    let mut engine = Engine::new(config)?;

    let mut feed = FeedReader::new(BufReader::new(io::stdin().lock()));
    let mut out = io::stdout().lock();

    while let Some(snapshot) = feed.next_turn().context("reading turn snapshot")? {
        let report = engine.play_turn(&snapshot, &mut LogObserver)?;
        writeln!(out, "{}", render(report.actions()))?;
        out.flush()?;
    }
    log::info!("input closed after {} turns", engine.turn());
    Ok(())
}
