use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::core::table::{merge_tables, MergeSummary};
use crate::utils::Error;

/// Concatenate every per-genre table in the output directory into the
/// unified dataset.
pub fn run(config: &Config) -> Result<(), Error> {
    let summary: MergeSummary = merge_tables(
        Path::new(&config.output.dir),
        Path::new(&config.output.merged_path),
    )?;
    info!(
        "{} csv files merged ({} rows) -> '{}'",
        summary.files, summary.rows, config.output.merged_path
    );
    Ok(())
}
