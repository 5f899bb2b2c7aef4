pub mod common;
pub mod merge;
pub mod scrape;
pub mod serve;
