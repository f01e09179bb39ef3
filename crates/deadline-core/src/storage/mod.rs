mod config;
pub mod database;

pub use config::{Config, NotificationsConfig, RenderConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/deadline[-dev]/` based on DEADLINE_ENV.
///
/// `DEADLINE_DATA_DIR` overrides the location entirely (tests point it
/// at a temp directory); otherwise set DEADLINE_ENV=dev to use the
/// development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    if let Ok(dir) = std::env::var("DEADLINE_DATA_DIR") {
        let path = PathBuf::from(dir);
        std::fs::create_dir_all(&path)?;
        return Ok(path);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DEADLINE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("deadline-dev")
    } else {
        base_dir.join("deadline")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
