pub mod clean;
pub mod dashboard;
pub mod scrape;
pub mod table;
