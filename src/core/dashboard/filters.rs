use serde::Deserialize;

use crate::models::movie::DurationBucket;

use super::types::CombinedTitle;

/// Query-string filters over the combined listing. `genres` and
/// `duration` are comma lists; unknown duration tokens are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filters {
    pub search: Option<String>,
    pub genres: Option<String>,
    pub min_rating: Option<f64>,
    pub min_votes: Option<u64>,
    pub duration: Option<String>,
}

impl Filters {
    fn genre_set(&self) -> Vec<String> {
        comma_list(self.genres.as_deref())
    }

    fn duration_set(&self) -> Vec<DurationBucket> {
        comma_list(self.duration.as_deref())
            .iter()
            .filter_map(|t| DurationBucket::parse(t))
            .collect()
    }
}

fn comma_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Apply filters to the combined listing. Genre selection follows the
/// original explode-filter-regroup semantics: a surviving entry shows
/// only the intersection of its genres with the selected set.
pub fn apply(combined: &[CombinedTitle], filters: &Filters) -> Vec<CombinedTitle> {
    let selected_genres = filters.genre_set();
    let selected_durations = filters.duration_set();
    let search = filters.search.as_deref().map(str::to_lowercase);

    let mut out = Vec::new();
    for entry in combined {
        if let Some(needle) = &search {
            if !entry.title.to_lowercase().contains(needle) {
                continue;
            }
        }

        if let Some(min) = filters.min_rating {
            if entry.ratings < min {
                continue;
            }
        }
        if let Some(min) = filters.min_votes {
            if entry.vote_counts < min {
                continue;
            }
        }

        if !selected_durations.is_empty() && !selected_durations.contains(&entry.duration_bucket())
        {
            continue;
        }

        if selected_genres.is_empty() {
            out.push(entry.clone());
            continue;
        }

        let matched: Vec<String> = entry
            .genres
            .iter()
            .filter(|g| selected_genres.contains(*g))
            .cloned()
            .collect();
        if matched.is_empty() {
            continue;
        }
        let mut filtered = entry.clone();
        filtered.genres = matched;
        out.push(filtered);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, genres: &[&str], ratings: f64, votes: u64, runtime: u64) -> CombinedTitle {
        CombinedTitle {
            title: title.to_string(),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            ratings,
            vote_counts: votes,
            runtime,
        }
    }

    fn sample() -> Vec<CombinedTitle> {
        vec![
            entry("Alpha", &["drama", "war"], 7.8, 5000, 130),
            entry("Beta", &["comedy"], 6.1, 300, 95),
            entry("Gamma", &["drama"], 8.9, 90000, 190),
        ]
    }

    #[test]
    fn genre_filter_shows_only_the_intersection() {
        let filters = Filters { genres: Some("war,comedy".to_string()), ..Default::default() };
        let out = apply(&sample(), &filters);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Alpha");
        assert_eq!(out[0].genres, vec!["war".to_string()]);
        assert_eq!(out[1].title, "Beta");
    }

    #[test]
    fn rating_vote_and_duration_thresholds() {
        let filters = Filters { min_rating: Some(7.0), min_votes: Some(1000), ..Default::default() };
        let out = apply(&sample(), &filters);
        assert_eq!(out.len(), 2);

        let filters = Filters { duration: Some("under2h".to_string()), ..Default::default() };
        let out = apply(&sample(), &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Beta");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filters = Filters { search: Some("aLpH".to_string()), ..Default::default() };
        let out = apply(&sample(), &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Alpha");
    }

    #[test]
    fn empty_filters_pass_everything_through() {
        let out = apply(&sample(), &Filters::default());
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].genres.len(), 2);
    }
}
