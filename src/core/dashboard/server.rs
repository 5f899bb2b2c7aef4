use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::models::movie::MovieRecord;
use crate::utils::Error;

use super::aggregate::combine_by_title;
use super::filters::{self, Filters};
use super::types::{CombinedTitle, DatasetStats};
use super::views;

/// Read-only dashboard state, loaded once at startup.
pub struct Dataset {
    pub source: String,
    pub records: Vec<MovieRecord>,
    pub combined: Vec<CombinedTitle>,
}

impl Dataset {
    pub fn new(source: String, records: Vec<MovieRecord>) -> Self {
        let combined = combine_by_title(&records);
        Self { source, records, combined }
    }

    fn stats(&self) -> DatasetStats {
        let genres: std::collections::BTreeSet<&str> =
            self.records.iter().map(|r| r.genre.as_str()).collect();
        DatasetStats {
            rows: self.records.len(),
            titles: self.combined.len(),
            genres: genres.len(),
            source: self.source.clone(),
        }
    }
}

pub fn router(dataset: Arc<Dataset>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/movies", get(list_movies))
        .route("/movies/export", get(export_movies))
        .route("/views/top10", get(top10))
        .route("/views/genres", get(genres))
        .route("/views/leaders", get(leaders))
        .route("/views/extremes", get(extremes))
        .route("/views/histogram", get(histogram))
        .route("/views/correlation", get(correlation))
        .with_state(dataset)
}

pub async fn serve(dataset: Dataset, host: &str, port: u16) -> Result<(), Error> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Dashboard listening on http://{addr}");
    axum::serve(listener, router(Arc::new(dataset))).await?;
    Ok(())
}

async fn home(State(dataset): State<Arc<Dataset>>) -> Json<DatasetStats> {
    Json(dataset.stats())
}

#[derive(Serialize)]
struct ListedMovie {
    title: String,
    genres: Vec<String>,
    ratings: f64,
    vote_counts: u64,
    runtime: u64,
    duration: &'static str,
}

#[derive(Serialize)]
struct MoviesResponse {
    count: usize,
    movies: Vec<ListedMovie>,
}

async fn list_movies(
    State(dataset): State<Arc<Dataset>>,
    Query(filters): Query<Filters>,
) -> Json<MoviesResponse> {
    let movies: Vec<ListedMovie> = filters::apply(&dataset.combined, &filters)
        .into_iter()
        .map(|entry| ListedMovie {
            duration: entry.duration_bucket().label(),
            title: entry.title,
            genres: entry.genres,
            ratings: entry.ratings,
            vote_counts: entry.vote_counts,
            runtime: entry.runtime,
        })
        .collect();
    Json(MoviesResponse { count: movies.len(), movies })
}

async fn export_movies(
    State(dataset): State<Arc<Dataset>>,
    Query(filters): Query<Filters>,
) -> Response {
    let filtered = filters::apply(&dataset.combined, &filters);
    match export_csv(&filtered) {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"movies_filtered.csv\"",
                ),
            ],
            body,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Filtered subset in the canonical five-column format, genre set
/// joined into one cell.
fn export_csv(entries: &[CombinedTitle]) -> Result<Vec<u8>, Error> {
    let mut body = b"\xef\xbb\xbf".to_vec();
    {
        let mut writer = csv::Writer::from_writer(&mut body);
        writer.write_record(crate::core::table::COLUMNS)?;
        for entry in entries {
            writer.write_record(&[
                entry.title.clone(),
                entry.genre_field(),
                format!("{:.1}", entry.ratings),
                entry.vote_counts.to_string(),
                entry.runtime.to_string(),
            ])?;
        }
        writer.flush()?;
    }
    Ok(body)
}

async fn top10(State(dataset): State<Arc<Dataset>>) -> Response {
    Json(views::top_ten(&dataset.records)).into_response()
}

async fn genres(State(dataset): State<Arc<Dataset>>) -> Response {
    Json(views::genre_summaries(&dataset.records)).into_response()
}

async fn leaders(State(dataset): State<Arc<Dataset>>) -> Response {
    Json(views::rating_leaders(&dataset.records)).into_response()
}

async fn extremes(State(dataset): State<Arc<Dataset>>) -> Response {
    match views::duration_extremes(&dataset.records) {
        Some(extremes) => Json(extremes).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn histogram(State(dataset): State<Arc<Dataset>>) -> Response {
    Json(views::rating_histogram(&dataset.records)).into_response()
}

async fn correlation(State(dataset): State<Arc<Dataset>>) -> Response {
    Json(json!({ "correlation": views::rating_vote_correlation(&dataset.records) }))
        .into_response()
}
