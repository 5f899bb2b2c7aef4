use serde::{Deserialize, Serialize};

/// Field texts read off a single result block by the page layer.
/// Any individual element lookup may fail; a failed field is `None`
/// and the block survives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: Option<String>,
    pub rating: Option<String>,
    pub votes: Option<String>,
    pub runtime: Option<String>,
}

/// One scraped item after block-level text hygiene, tagged with the
/// genre of the batch it came from. Transient: consumed immediately
/// by the batch finalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub title: String,
    pub genre: String,
    pub rating: Option<String>,
    pub votes: Option<String>,
    pub runtime: Option<String>,
}

/// Normalized output row. Column names in the CSV are exactly
/// `Title,Genre,Ratings,Vote_Counts,Runtime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    /// One fractional digit, 0.0–10.0.
    #[serde(rename = "Ratings")]
    pub ratings: f64,
    #[serde(rename = "Vote_Counts")]
    pub vote_counts: u64,
    /// Minutes.
    #[serde(rename = "Runtime")]
    pub runtime: u64,
}

impl PartialEq for MovieRecord {
    fn eq(&self, other: &Self) -> bool {
        self.dedup_key() == other.dedup_key()
    }
}

impl Eq for MovieRecord {}

impl MovieRecord {
    /// Full-row identity used for exact-duplicate removal. Ratings is
    /// compared by bits; every value is the product of the same
    /// round-to-one-decimal step, so equal ratings share a representation.
    pub fn dedup_key(&self) -> (&str, &str, u64, u64, u64) {
        (
            &self.title,
            &self.genre,
            self.ratings.to_bits(),
            self.vote_counts,
            self.runtime,
        )
    }
}

/// Duration buckets used by the dashboard filters. `parse` reads the
/// query-string tokens, `label` is the display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBucket {
    Under2h,
    TwoToThree,
    Over3h,
}

impl DurationBucket {
    pub fn of(runtime_minutes: u64) -> Self {
        if runtime_minutes < 120 {
            Self::Under2h
        } else if runtime_minutes <= 180 {
            Self::TwoToThree
        } else {
            Self::Over3h
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Under2h => "< 2hrs",
            Self::TwoToThree => "2-3hrs",
            Self::Over3h => "> 3hrs",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "under2h" => Some(Self::Under2h),
            "2to3h" => Some(Self::TwoToThree),
            "over3h" => Some(Self::Over3h),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_bucket_edges() {
        assert_eq!(DurationBucket::of(119), DurationBucket::Under2h);
        assert_eq!(DurationBucket::of(120), DurationBucket::TwoToThree);
        assert_eq!(DurationBucket::of(180), DurationBucket::TwoToThree);
        assert_eq!(DurationBucket::of(181), DurationBucket::Over3h);
    }

    #[test]
    fn duration_bucket_tokens() {
        assert_eq!(DurationBucket::parse("under2h"), Some(DurationBucket::Under2h));
        assert_eq!(DurationBucket::parse(" 2to3h "), Some(DurationBucket::TwoToThree));
        assert_eq!(DurationBucket::parse("OVER3H"), Some(DurationBucket::Over3h));
        assert_eq!(DurationBucket::parse("3hrs"), None);
    }

    #[test]
    fn records_differing_only_in_genre_are_distinct() {
        let a = MovieRecord {
            title: "Dune".into(),
            genre: "sci-fi".into(),
            ratings: 8.3,
            vote_counts: 1000,
            runtime: 155,
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.genre = "adventure".into();
        assert_ne!(a, b);
    }
}
