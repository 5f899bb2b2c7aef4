use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::config::Config;
use crate::core::clean::finalize_batch;
use crate::core::scrape::{scrape_genre, GenreOutcome, SearchPage, WebDriverPage};
use crate::core::table::write_genre_table;
use crate::utils::Error;

/// Run the whole scrape: one browser session for the run, genres
/// strictly sequential, the session closed no matter how the genre
/// loop went.
pub async fn run(config: &Config) -> Result<Vec<GenreOutcome>, Error> {
    crate::app::common::ensure_output_dir(&config.output).map_err(Error::Other)?;

    let page = WebDriverPage::connect(&config.scrape).await?;
    let outcomes = run_with(page, config).await;
    report(&outcomes);
    Ok(outcomes)
}

/// Generic over the page so the loop is testable without a browser.
async fn run_with(mut page: impl SearchPage, config: &Config) -> Vec<GenreOutcome> {
    let outcomes = scrape_all(&mut page, config).await;
    if let Err(e) = page.close().await {
        warn!("Failed to close browser session: {e}");
    }
    outcomes
}

async fn scrape_all(page: &mut (impl SearchPage + ?Sized), config: &Config) -> Vec<GenreOutcome> {
    let mut outcomes = Vec::with_capacity(config.scrape.genres.len());
    for genre in &config.scrape.genres {
        match scrape_one(page, genre, config).await {
            Ok((rows, path)) => {
                outcomes.push(GenreOutcome::Written { genre: genre.clone(), rows, path });
            }
            Err(e) => {
                error!("Error scraping {genre}: {e}");
                outcomes.push(GenreOutcome::Failed { genre: genre.clone(), reason: e.to_string() });
            }
        }
    }
    outcomes
}

async fn scrape_one(
    page: &mut (impl SearchPage + ?Sized),
    genre: &str,
    config: &Config,
) -> Result<(usize, PathBuf), Error> {
    let blocks = scrape_genre(page, genre, &config.scrape).await?;
    let records = finalize_batch(genre, blocks)?;
    let path = write_genre_table(Path::new(&config.output.dir), genre, &records)?;
    info!("Saved {} movies to '{}'", records.len(), path.display());
    Ok((records.len(), path))
}

/// Account for every genre, so a table missing from the merge is never
/// a mystery.
fn report(outcomes: &[GenreOutcome]) {
    let written = outcomes
        .iter()
        .filter(|o| matches!(o, GenreOutcome::Written { .. }))
        .count();
    info!("Scraping complete: {written}/{} genres written", outcomes.len());
    for outcome in outcomes {
        if let GenreOutcome::Failed { genre, reason } = outcome {
            warn!("Genre '{genre}' has no table: {reason}");
        }
    }
}
