//! Engine configuration loading.

use std::path::Path;

use anyhow::{Context, Result};

use tn_core::EngineConfig;

/// Read an [`EngineConfig`] from a JSON file.  Missing fields take their
/// defaults; the result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate().with_context(|| format!("validating config {}", path.display()))?;
    Ok(config)
}

/// `--config <path>` from the command line, if given.
pub fn config_path(mut args: impl Iterator<Item = String>) -> Result<Option<String>> {
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(Some).context("--config needs a file path");
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Ok(Some(path.to_owned()));
        }
    }
    Ok(None)
}
