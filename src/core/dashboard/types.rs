use serde::Serialize;

use crate::models::movie::DurationBucket;

/// One title with its genre rows folded together: sorted, deduplicated
/// genre set, first-seen values for the numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedTitle {
    pub title: String,
    pub genres: Vec<String>,
    pub ratings: f64,
    pub vote_counts: u64,
    pub runtime: u64,
}

impl CombinedTitle {
    pub fn duration_bucket(&self) -> DurationBucket {
        DurationBucket::of(self.runtime)
    }

    /// The genre set as one CSV cell.
    pub fn genre_field(&self) -> String {
        self.genres.join(", ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetStats {
    pub rows: usize,
    pub titles: usize,
    pub genres: usize,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMovie {
    pub title: String,
    pub ratings: f64,
    pub vote_counts: u64,
}

/// Per-genre roll-up; `avg_rating` doubles as the heat-map data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSummary {
    pub genre: String,
    pub movies: usize,
    pub avg_rating: f64,
    pub avg_runtime: f64,
    pub avg_votes: f64,
    pub total_votes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingLeader {
    pub genre: String,
    pub title: String,
    pub ratings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeMovie {
    pub title: String,
    pub runtime: u64,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationExtremes {
    pub shortest: ExtremeMovie,
    pub longest: ExtremeMovie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}
