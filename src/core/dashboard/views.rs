use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use crate::core::clean::round1;
use crate::models::movie::MovieRecord;

use super::types::{
    DurationExtremes, ExtremeMovie, GenreSummary, HistogramBin, RatingLeader, TopMovie,
};

/// Top 10 by rating, vote count breaking ties, one row per title.
pub fn top_ten(records: &[MovieRecord]) -> Vec<TopMovie> {
    let mut sorted: Vec<&MovieRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.ratings
            .total_cmp(&a.ratings)
            .then(b.vote_counts.cmp(&a.vote_counts))
    });

    let mut seen = HashSet::new();
    sorted
        .into_iter()
        .filter(|r| seen.insert(r.title.clone()))
        .take(10)
        .map(|r| TopMovie {
            title: r.title.clone(),
            ratings: r.ratings,
            vote_counts: r.vote_counts,
        })
        .collect()
}

/// Per-genre roll-up over the raw (per-genre) rows, sorted by genre.
pub fn genre_summaries(records: &[MovieRecord]) -> Vec<GenreSummary> {
    struct Acc {
        movies: usize,
        rating_sum: f64,
        runtime_sum: u64,
        vote_sum: u64,
    }

    let mut by_genre: BTreeMap<String, Acc> = BTreeMap::new();
    for r in records {
        let acc = match by_genre.entry(r.genre.clone()) {
            Entry::Vacant(v) => v.insert(Acc { movies: 0, rating_sum: 0.0, runtime_sum: 0, vote_sum: 0 }),
            Entry::Occupied(o) => o.into_mut(),
        };
        acc.movies += 1;
        acc.rating_sum += r.ratings;
        acc.runtime_sum += r.runtime;
        acc.vote_sum += r.vote_counts;
    }

    by_genre
        .into_iter()
        .map(|(genre, acc)| {
            let n = acc.movies as f64;
            GenreSummary {
                genre,
                movies: acc.movies,
                avg_rating: round1(acc.rating_sum / n),
                avg_runtime: round1(acc.runtime_sum as f64 / n),
                avg_votes: round1(acc.vote_sum as f64 / n),
                total_votes: acc.vote_sum,
            }
        })
        .collect()
}

/// Highest-rated title per genre, listed in genre order.
pub fn rating_leaders(records: &[MovieRecord]) -> Vec<RatingLeader> {
    let mut sorted: Vec<&MovieRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.ratings.total_cmp(&a.ratings));

    let mut seen = HashSet::new();
    let mut leaders: Vec<RatingLeader> = sorted
        .into_iter()
        .filter(|r| seen.insert(r.genre.clone()))
        .map(|r| RatingLeader {
            genre: r.genre.clone(),
            title: r.title.clone(),
            ratings: r.ratings,
        })
        .collect();
    leaders.sort_by(|a, b| a.genre.cmp(&b.genre));
    leaders
}

/// Shortest and longest movie by runtime, first occurrence on ties.
pub fn duration_extremes(records: &[MovieRecord]) -> Option<DurationExtremes> {
    let mut shortest = records.first()?;
    let mut longest = shortest;
    for r in records {
        if r.runtime < shortest.runtime {
            shortest = r;
        }
        if r.runtime > longest.runtime {
            longest = r;
        }
    }
    Some(DurationExtremes {
        shortest: extreme(shortest),
        longest: extreme(longest),
    })
}

fn extreme(r: &MovieRecord) -> ExtremeMovie {
    ExtremeMovie {
        title: r.title.clone(),
        runtime: r.runtime,
        formatted: format_runtime(r.runtime),
    }
}

pub fn format_runtime(minutes: u64) -> String {
    format!("{} min ({}h {}m)", minutes, minutes / 60, minutes % 60)
}

/// Rating distribution: 20 equal-width bins over the observed range.
/// Single-valued data collapses to one bin.
pub fn rating_histogram(records: &[MovieRecord]) -> Vec<HistogramBin> {
    const BINS: usize = 20;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for r in records {
        min = min.min(r.ratings);
        max = max.max(r.ratings);
    }
    if records.is_empty() {
        return Vec::new();
    }
    if min == max {
        return vec![HistogramBin { start: min, end: max, count: records.len() }];
    }

    let width = (max - min) / BINS as f64;
    let mut bins: Vec<HistogramBin> = (0..BINS)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for r in records {
        let idx = (((r.ratings - min) / width) as usize).min(BINS - 1);
        bins[idx].count += 1;
    }
    bins
}

/// Pearson correlation of ratings against vote counts. `None` with
/// fewer than two rows or a zero-variance side.
pub fn rating_vote_correlation(records: &[MovieRecord]) -> Option<f64> {
    let n = records.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_r = records.iter().map(|r| r.ratings).sum::<f64>() / nf;
    let mean_v = records.iter().map(|r| r.vote_counts as f64).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_r = 0.0;
    let mut var_v = 0.0;
    for r in records {
        let dr = r.ratings - mean_r;
        let dv = r.vote_counts as f64 - mean_v;
        cov += dr * dv;
        var_r += dr * dr;
        var_v += dv * dv;
    }
    if var_r == 0.0 || var_v == 0.0 {
        return None;
    }
    Some(cov / (var_r.sqrt() * var_v.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, genre: &str, ratings: f64, votes: u64, runtime: u64) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            genre: genre.to_string(),
            ratings,
            vote_counts: votes,
            runtime,
        }
    }

    fn sample() -> Vec<MovieRecord> {
        vec![
            row("Alpha", "drama", 7.8, 5000, 130),
            row("Alpha", "war", 7.8, 5000, 130),
            row("Beta", "comedy", 6.1, 300, 95),
            row("Gamma", "drama", 8.9, 90000, 190),
        ]
    }

    #[test]
    fn top_ten_dedupes_titles_and_orders_by_rating_then_votes() {
        let top = top_ten(&sample());
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].title, "Gamma");
        assert_eq!(top[1].title, "Alpha");
        assert_eq!(top[2].title, "Beta");
    }

    #[test]
    fn genre_summaries_average_and_total() {
        let summaries = genre_summaries(&sample());
        assert_eq!(summaries.len(), 3);
        let drama = summaries.iter().find(|s| s.genre == "drama").unwrap();
        assert_eq!(drama.movies, 2);
        assert_eq!(drama.avg_rating, 8.4); // (7.8 + 8.9) / 2 rounded
        assert_eq!(drama.avg_runtime, 160.0);
        assert_eq!(drama.total_votes, 95000);
    }

    #[test]
    fn leaders_pick_the_best_title_per_genre() {
        let leaders = rating_leaders(&sample());
        assert_eq!(leaders.len(), 3);
        assert_eq!(leaders[0].genre, "comedy");
        let drama = leaders.iter().find(|l| l.genre == "drama").unwrap();
        assert_eq!(drama.title, "Gamma");
    }

    #[test]
    fn extremes_and_runtime_formatting() {
        let extremes = duration_extremes(&sample()).unwrap();
        assert_eq!(extremes.shortest.title, "Beta");
        assert_eq!(extremes.longest.title, "Gamma");
        assert_eq!(extremes.longest.formatted, "190 min (3h 10m)");
        assert!(duration_extremes(&[]).is_none());
    }

    #[test]
    fn histogram_covers_the_range() {
        let bins = rating_histogram(&sample());
        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
        assert_eq!(bins[0].start, 6.1);
        assert!((bins[19].end - 8.9).abs() < 1e-9);
        // max value lands in the last bin
        assert!(bins[19].count >= 1);
    }

    #[test]
    fn histogram_degenerate_cases() {
        assert!(rating_histogram(&[]).is_empty());
        let one = rating_histogram(&[row("A", "x", 7.0, 1, 90), row("B", "x", 7.0, 2, 90)]);
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].count, 2);
    }

    #[test]
    fn perfectly_linear_sample_correlates_to_one() {
        let rows: Vec<MovieRecord> = (1..=5)
            .map(|i| row(&format!("M{i}"), "x", i as f64, (i * 1000) as u64, 90))
            .collect();
        let c = rating_vote_correlation(&rows).unwrap();
        assert!((c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn correlation_needs_variance() {
        assert!(rating_vote_correlation(&[]).is_none());
        let flat = vec![row("A", "x", 7.0, 10, 90), row("B", "x", 7.0, 20, 90)];
        assert!(rating_vote_correlation(&flat).is_none());
    }
}
