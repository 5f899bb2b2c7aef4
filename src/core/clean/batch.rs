use std::collections::HashSet;

use crate::core::clean::{parse_rating, parse_runtime, parse_votes, round1};
use crate::models::movie::{MovieRecord, RawBlock};
use crate::utils::Error;

/// Turn one genre's raw blocks into a clean table. Order matters:
/// parse everything first, compute per-field medians over the
/// parseable values only, impute, cast, then drop exact duplicates.
///
/// A field with absent values but zero parseable ones has no median;
/// that is a reportable error for the whole batch, never a zero.
pub fn finalize_batch(genre: &str, blocks: Vec<RawBlock>) -> Result<Vec<MovieRecord>, Error> {
    let parsed: Vec<ParsedBlock> = blocks.into_iter().map(ParsedBlock::from).collect();

    let rating_median = field_median(genre, "Ratings", &parsed, |p| p.rating)?;
    let votes_median = field_median(genre, "Vote_Counts", &parsed, |p| p.votes)?;
    let runtime_median = field_median(genre, "Runtime", &parsed, |p| p.runtime)?;

    let mut out = Vec::with_capacity(parsed.len());
    let mut seen = HashSet::new();
    for p in parsed {
        let record = MovieRecord {
            title: p.title,
            genre: p.genre,
            // re-round: an even-count median can pick up a second decimal
            ratings: round1(p.rating.or(rating_median).unwrap_or_default()),
            // truncation toward zero, like the original's astype(int)
            vote_counts: p.votes.or(votes_median).unwrap_or_default() as u64,
            runtime: p.runtime.or(runtime_median).unwrap_or_default() as u64,
        };
        let key = (
            record.title.clone(),
            record.genre.clone(),
            record.ratings.to_bits(),
            record.vote_counts,
            record.runtime,
        );
        if seen.insert(key) {
            out.push(record);
        }
    }
    Ok(out)
}

struct ParsedBlock {
    title: String,
    genre: String,
    rating: Option<f64>,
    votes: Option<f64>,
    runtime: Option<f64>,
}

impl From<RawBlock> for ParsedBlock {
    fn from(b: RawBlock) -> Self {
        Self {
            rating: parse_rating(b.rating.as_deref()),
            votes: parse_votes(b.votes.as_deref()).map(|v| v as f64),
            runtime: parse_runtime(b.runtime.as_deref()).map(|v| v as f64),
            title: b.title,
            genre: b.genre,
        }
    }
}

/// Median of the parseable values for one field. `None` when the batch
/// has no absent values to fill (the median is then never used);
/// `Error::EmptyField` when imputation is needed but impossible.
fn field_median(
    genre: &str,
    field: &'static str,
    parsed: &[ParsedBlock],
    get: impl Fn(&ParsedBlock) -> Option<f64>,
) -> Result<Option<f64>, Error> {
    let values: Vec<f64> = parsed.iter().filter_map(&get).collect();
    let has_absent = values.len() < parsed.len();
    if !has_absent {
        return Ok(None);
    }
    match median(values) {
        Some(m) => Ok(Some(m)),
        None => Err(Error::EmptyField { genre: genre.to_string(), field }),
    }
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let n = values.len();
    Some(if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    })
}
