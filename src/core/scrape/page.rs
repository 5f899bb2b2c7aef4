use async_trait::async_trait;

use crate::models::movie::RawItem;
use crate::utils::Error;

/// Result of one "load more" attempt. `Exhausted` is the normal end
/// condition for a genre's list — the bounded wait for the trigger
/// elapsed — not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    Loaded,
    Exhausted,
}

/// The "locate and read element text" seam. Everything that knows
/// about the live page structure sits behind this trait, so a layout
/// change on the upstream site breaks exactly one implementation.
#[async_trait]
pub trait SearchPage: Send {
    async fn open(&mut self, url: &str) -> Result<(), Error>;

    /// Trigger the load-more control once, waiting for content to settle.
    async fn load_more(&mut self) -> Result<LoadMore, Error>;

    /// Read the raw field texts of every result block currently loaded.
    async fn items(&mut self) -> Result<Vec<RawItem>, Error>;

    /// Release the underlying session.
    async fn close(&mut self) -> Result<(), Error>;
}
