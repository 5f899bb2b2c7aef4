use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::movie::MovieRecord;

use super::types::CombinedTitle;

/// Fold per-genre rows into one entry per title. A movie scraped under
/// several genres keeps the numeric values of its first row and a
/// sorted, deduplicated union of its genre tags (a tag cell may itself
/// be comma-separated). Output is ordered by title.
pub fn combine_by_title(records: &[MovieRecord]) -> Vec<CombinedTitle> {
    struct Acc {
        genres: BTreeSet<String>,
        ratings: f64,
        vote_counts: u64,
        runtime: u64,
    }

    let mut by_title: BTreeMap<String, Acc> = BTreeMap::new();
    for r in records {
        let acc = match by_title.entry(r.title.clone()) {
            Entry::Vacant(v) => v.insert(Acc {
                genres: BTreeSet::new(),
                ratings: r.ratings,
                vote_counts: r.vote_counts,
                runtime: r.runtime,
            }),
            Entry::Occupied(o) => o.into_mut(),
        };
        for tag in r.genre.split(',') {
            let tag = tag.trim();
            if !tag.is_empty() {
                acc.genres.insert(tag.to_string());
            }
        }
    }

    by_title
        .into_iter()
        .map(|(title, acc)| CombinedTitle {
            title,
            genres: acc.genres.into_iter().collect(),
            ratings: acc.ratings,
            vote_counts: acc.vote_counts,
            runtime: acc.runtime,
        })
        .collect()
}
