use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::Level;

pub fn init_logging(config: &crate::config::Config) {
    tracing_subscriber::fmt()
        .with_max_level(Level::from_str(&config.logs.level).unwrap_or(Level::INFO))
        .init();
}

pub fn ensure_output_dir(config: &crate::config::OutputConfig) -> Result<PathBuf, String> {
    let dir = PathBuf::from(&config.dir);
    if dir.exists() {
        if !dir.is_dir() {
            return Err(format!(
                "Configured output dir '{}' exists but is not a directory",
                dir.display()
            ));
        }
        return Ok(dir);
    }

    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create output dir '{}': {}", dir.display(), e))?;
    tracing::info!("Created output directory: '{}'", dir.display());
    Ok(dir)
}

pub fn dataset_path(config: &crate::config::Config) -> PathBuf {
    config
        .dashboard
        .dataset
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(&config.output.merged_path).to_path_buf())
}
