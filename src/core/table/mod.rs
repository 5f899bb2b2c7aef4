use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::movie::MovieRecord;
use crate::utils::Error;

/// Spreadsheet tools sniff encodings; the BOM keeps them honest.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

pub const COLUMNS: [&str; 5] = ["Title", "Genre", "Ratings", "Vote_Counts", "Runtime"];

/// Write one genre's clean table as `genre_<tag>.csv` under `dir`.
pub fn write_genre_table(
    dir: &Path,
    genre: &str,
    records: &[MovieRecord],
) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("genre_{genre}.csv"));
    write_table(&path, records)?;
    Ok(path)
}

pub fn write_table(path: &Path, records: &[MovieRecord]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    // serialize only emits the header row alongside a record
    if records.is_empty() {
        writer.write_record(COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a table back, keeping only the five canonical columns; any
/// extra columns in the file are ignored. The csv reader strips a
/// leading BOM on its own.
pub fn read_table(path: &Path) -> Result<Vec<MovieRecord>, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub files: usize,
    pub rows: usize,
}

/// Concatenate every `genre_*.csv` under `dir` (in file-name order)
/// into one table at `merged_path`. No cross-genre deduplication: a
/// title scraped under several genres keeps one row per genre.
pub fn merge_tables(dir: &Path, merged_path: &Path) -> Result<MergeSummary, Error> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| is_genre_table(p))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(Error::NothingToMerge(dir.display().to_string()));
    }

    let mut merged = Vec::new();
    for path in &paths {
        let rows = read_table(path)?;
        debug!("{}: {} rows", path.display(), rows.len());
        merged.extend(rows);
    }

    write_table(merged_path, &merged)?;
    Ok(MergeSummary { files: paths.len(), rows: merged.len() })
}

fn is_genre_table(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("genre_") && n.ends_with(".csv"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, genre: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            genre: genre.to_string(),
            ratings: 7.5,
            vote_counts: 1200,
            runtime: 110,
        }
    }

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_genre_table(dir.path(), "drama", &[record("A", "drama")]).unwrap();
        assert!(path.ends_with("genre_drama.csv"));

        let rows = read_table(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "A");
        assert_eq!(rows[0].ratings, 7.5);
    }

    #[test]
    fn tables_start_with_a_bom_and_the_canonical_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_genre_table(dir.path(), "war", &[record("A", "war")]).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.starts_with("Title,Genre,Ratings,Vote_Counts,Runtime"));
    }

    #[test]
    fn empty_table_still_gets_a_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_genre_table(dir.path(), "western", &[]).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.starts_with("Title,Genre,Ratings,Vote_Counts,Runtime"));
    }

    #[test]
    fn merge_concatenates_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_genre_table(dir.path(), "war", &[record("W", "war")]).unwrap();
        write_genre_table(
            dir.path(),
            "drama",
            &[record("A", "drama"), record("B", "drama")],
        )
        .unwrap();
        // not a genre table, must be skipped
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let merged_path = dir.path().join("movies.csv");
        let summary = merge_tables(dir.path(), &merged_path).unwrap();
        assert_eq!(summary, MergeSummary { files: 2, rows: 3 });

        let rows = read_table(&merged_path).unwrap();
        assert_eq!(rows.len(), 3);
        // genre_drama.csv sorts before genre_war.csv
        assert_eq!(rows[0].genre, "drama");
        assert_eq!(rows[2].genre, "war");
    }

    #[test]
    fn merge_of_an_empty_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = merge_tables(dir.path(), &dir.path().join("movies.csv")).unwrap_err();
        assert!(matches!(err, Error::NothingToMerge(_)));
    }

    #[test]
    fn extra_columns_are_ignored_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genre_x.csv");
        std::fs::write(
            &path,
            "Title,Genre,Ratings,Vote_Counts,Runtime,Extra\nA,x,7.0,10,90,ignored\n",
        )
        .unwrap();
        let rows = read_table(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].runtime, 90);
    }
}
