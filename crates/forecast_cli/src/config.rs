//! Engine configuration loading for CLI commands.

use std::path::Path;

use forecast_engine::config::EngineConfig;
use tracing::{debug, info};

use crate::Result;

/// Load the engine configuration.
///
/// A missing file falls back to the built-in defaults; a file that exists
/// but does not parse is an error. Environment overrides are applied and
/// the result is validated.
pub fn load(path: &str) -> Result<EngineConfig> {
    let path = Path::new(path);
    let config = if path.exists() {
        info!("Loading configuration from {}", path.display());
        EngineConfig::load(path)?
    } else {
        debug!("No configuration at {}, using defaults", path.display());
        EngineConfig::default()
    };

    let config = config.with_env_override()?;
    config.validate()?;
    Ok(config)
}
