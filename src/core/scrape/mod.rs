pub mod page;
pub mod webdriver;

pub use page::{LoadMore, SearchPage};
pub use webdriver::WebDriverPage;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ScrapeConfig;
use crate::core::clean::{clean_text, extract_title};
use crate::models::movie::{RawBlock, RawItem};
use crate::utils::Error;

/// How one genre ended. Collected into a list so the run can report
/// exactly which genres are missing from the merge and why, instead of
/// a silent skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreOutcome {
    Written {
        genre: String,
        rows: usize,
        path: PathBuf,
    },
    Failed {
        genre: String,
        reason: String,
    },
}

/// Scrape one genre: open its search page, trigger "load more" until
/// the trigger stops appearing, then read every result block.
pub async fn scrape_genre(
    page: &mut (impl SearchPage + ?Sized),
    genre: &str,
    cfg: &ScrapeConfig,
) -> Result<Vec<RawBlock>, Error> {
    let url = cfg.genre_url(genre);
    info!("Scraping genre '{genre}'");
    debug!("Search URL: {url}");
    page.open(&url).await?;

    let mut clicks = 0usize;
    loop {
        match page.load_more().await? {
            LoadMore::Loaded => {
                clicks += 1;
                info!("'Load more' clicked ({clicks})");
            }
            LoadMore::Exhausted => {
                info!("No more 'load more' trigger for '{genre}'");
                break;
            }
        }
    }

    let items = page.items().await?;
    debug!("{} raw items for '{genre}'", items.len());
    Ok(items.into_iter().map(|item| to_block(item, genre)).collect())
}

fn to_block(item: RawItem, genre: &str) -> RawBlock {
    RawBlock {
        title: item
            .title
            .as_deref()
            .map(extract_title)
            .unwrap_or("N/A")
            .to_string(),
        genre: genre.to_string(),
        rating: item.rating,
        votes: item.votes.as_deref().map(clean_text),
        runtime: item.runtime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FakePage {
        loads_remaining: usize,
        items: Vec<RawItem>,
        opened: Vec<String>,
        clicks: usize,
    }

    #[async_trait]
    impl SearchPage for FakePage {
        async fn open(&mut self, url: &str) -> Result<(), Error> {
            self.opened.push(url.to_string());
            Ok(())
        }

        async fn load_more(&mut self) -> Result<LoadMore, Error> {
            if self.loads_remaining == 0 {
                return Ok(LoadMore::Exhausted);
            }
            self.loads_remaining -= 1;
            self.clicks += 1;
            Ok(LoadMore::Loaded)
        }

        async fn items(&mut self) -> Result<Vec<RawItem>, Error> {
            Ok(self.items.clone())
        }

        async fn close(&mut self) -> Result<(), Error> {
            Ok(())
        }
    }

    fn item(title: &str, votes: &str) -> RawItem {
        RawItem {
            title: Some(title.to_string()),
            rating: Some("7.2".to_string()),
            votes: Some(votes.to_string()),
            runtime: Some("2h 15m".to_string()),
        }
    }

    #[tokio::test]
    async fn loads_until_exhausted_then_reads_blocks() {
        let mut page = FakePage {
            loads_remaining: 3,
            items: vec![item("1. Oppenheimer", "(12,345)"), item("2. Dune", "900")],
            opened: Vec::new(),
            clicks: 0,
        };

        let cfg = ScrapeConfig::default();
        let blocks = scrape_genre(&mut page, "drama", &cfg).await.unwrap();

        assert_eq!(page.clicks, 3);
        assert_eq!(page.opened.len(), 1);
        assert!(page.opened[0].contains("genres=drama"));

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "Oppenheimer");
        assert_eq!(blocks[0].genre, "drama");
        assert_eq!(blocks[0].votes.as_deref(), Some("12345"));
        assert_eq!(blocks[1].title, "Dune");
    }

    #[tokio::test]
    async fn missing_title_falls_back_to_na() {
        let mut page = FakePage {
            loads_remaining: 0,
            items: vec![RawItem::default()],
            opened: Vec::new(),
            clicks: 0,
        };

        let cfg = ScrapeConfig::default();
        let blocks = scrape_genre(&mut page, "war", &cfg).await.unwrap();
        assert_eq!(blocks[0].title, "N/A");
        assert_eq!(blocks[0].votes, None);
    }
}
