use std::time::Duration;

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::models::movie::RawItem;
use crate::utils::Error;

use super::page::{LoadMore, SearchPage};

// The page contract. Hashed class names and positional spans are an
// implicit agreement with the current upstream layout; when the site
// ships a new frontend these are the only lines that change.
const ITEM_BLOCK: Locator<'static> = Locator::Css("div.sc-86fea7d1-0.kFfAkw");
const LOAD_MORE_TRIGGER: Locator<'static> = Locator::Css("button.ipc-see-more__button");
const TITLE: Locator<'static> = Locator::XPath("./div/a/h3");
const RATING: Locator<'static> =
    Locator::XPath(".//div[@data-testid='ratingGroup--container']/span/span[1]");
const VOTES: Locator<'static> =
    Locator::XPath(".//div[@data-testid='ratingGroup--container']/span/span[2]");
const RUNTIME: Locator<'static> = Locator::XPath("./div/span[2]");

/// `SearchPage` over a live WebDriver session.
pub struct WebDriverPage {
    client: Client,
    page_settle: Duration,
    scroll_settle: Duration,
    load_settle: Duration,
    load_more_timeout: Duration,
}

impl WebDriverPage {
    pub async fn connect(cfg: &ScrapeConfig) -> Result<Self, Error> {
        let mut caps = serde_json::map::Map::new();
        if cfg.headless {
            caps.insert(
                "goog:chromeOptions".to_string(),
                serde_json::json!({ "args": ["--headless=new"] }),
            );
        }

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&cfg.webdriver_url)
            .await?;

        Ok(Self {
            client,
            page_settle: Duration::from_secs(cfg.page_settle_secs),
            scroll_settle: Duration::from_secs(cfg.scroll_settle_secs),
            load_settle: Duration::from_secs(cfg.load_settle_secs),
            load_more_timeout: Duration::from_secs(cfg.load_more_timeout_secs),
        })
    }
}

#[async_trait]
impl SearchPage for WebDriverPage {
    async fn open(&mut self, url: &str) -> Result<(), Error> {
        self.client.goto(url).await?;
        tokio::time::sleep(self.page_settle).await;
        Ok(())
    }

    async fn load_more(&mut self) -> Result<LoadMore, Error> {
        let trigger = match self
            .client
            .wait()
            .at_most(self.load_more_timeout)
            .for_element(LOAD_MORE_TRIGGER)
            .await
        {
            Ok(el) => el,
            Err(CmdError::WaitTimeout) => return Ok(LoadMore::Exhausted),
            Err(e) => return Err(e.into()),
        };

        let arg = serde_json::to_value(&trigger)
            .map_err(|e| Error::Other(format!("element serialization failed: {e}")))?;

        self.client
            .execute("arguments[0].scrollIntoView({block: 'center'});", vec![arg.clone()])
            .await?;
        tokio::time::sleep(self.scroll_settle).await; // scroll animation

        // JS click: the trigger can sit under a sticky header where a
        // plain element click misses.
        self.client.execute("arguments[0].click();", vec![arg]).await?;
        tokio::time::sleep(self.load_settle).await;

        Ok(LoadMore::Loaded)
    }

    async fn items(&mut self) -> Result<Vec<RawItem>, Error> {
        let blocks = self.client.find_all(ITEM_BLOCK).await?;
        debug!("{} result blocks on page", blocks.len());

        let mut items = Vec::with_capacity(blocks.len());
        for block in &blocks {
            items.push(RawItem {
                title: field_text(block, TITLE).await,
                rating: field_text(block, RATING).await,
                votes: field_text(block, VOTES).await,
                runtime: field_text(block, RUNTIME).await,
            });
        }
        Ok(items)
    }

    async fn close(&mut self) -> Result<(), Error> {
        self.client.clone().close().await?;
        Ok(())
    }
}

/// One field read on one block. A missed lookup degrades the field to
/// `None`, it never fails the block.
async fn field_text(block: &Element, locator: Locator<'_>) -> Option<String> {
    match block.find(locator).await {
        Ok(el) => el.text().await.ok(),
        Err(_) => None,
    }
}
