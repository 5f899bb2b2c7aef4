use tracing::info;

use crate::config::Config;
use crate::core::dashboard::server::Dataset;
use crate::core::table::read_table;
use crate::utils::Error;

/// Load the merged dataset once and serve the dashboard API over it.
pub async fn run(config: &Config) -> Result<(), Error> {
    let path = crate::app::common::dataset_path(config);
    let records = read_table(&path)?;
    let dataset = Dataset::new(path.display().to_string(), records);
    info!(
        "Loaded {} rows from '{}' ({} distinct titles)",
        dataset.records.len(),
        path.display(),
        dataset.combined.len()
    );

    crate::core::dashboard::serve(dataset, &config.dashboard.host, config.dashboard.port).await
}
