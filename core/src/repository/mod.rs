pub mod month;
pub mod settings;
pub mod traits;

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

// Re-export
pub use month::FileMonthRepository;
pub use settings::FileSettingsRepository;
pub use traits::{MonthRepository, SettingsRepository};

pub const DATA_DIR_ENV: &str = "WORKSTYLE_HOME";

/// Resolves the data directory: explicit path, then `$WORKSTYLE_HOME`, then `~/.workstyle`.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = base_dir {
        return Ok(dir);
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(".workstyle"))
}
