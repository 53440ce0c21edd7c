use bkl::{LedgerConfig, Result};

use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Installs the stderr logger (`RUST_LOG` overrides the level) and loads the ledger config
pub fn configure_app() -> Result<LedgerConfig> {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    let config = LedgerConfig::from_env()?;

    return Ok(config);
}
