use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uw_core::render::{matches_search, SummaryView};
use uw_core::{CoverageStats, FetchState, Leaning, TimelineDataPoint};
use uw_inference::aggregate::fetch_all_summaries;
use uw_inference::focus::FocusSnapshot;

use crate::AppState;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OutletGroup {
    pub leaning: Leaning,
    pub outlets: &'static [&'static str],
}

pub async fn list_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.topics.clone())
}

pub async fn list_outlets() -> impl IntoResponse {
    let groups: Vec<OutletGroup> = Leaning::ALL
        .iter()
        .map(|leaning| OutletGroup {
            leaning: *leaning,
            outlets: leaning.outlets(),
        })
        .collect();
    Json(groups)
}

pub async fn get_summaries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<FetchState<Vec<SummaryView>>> {
    let digest = fetch_all_summaries(&state.briefer, state.topics.as_slice()).await;
    let term = query.q.unwrap_or_default();
    let views = digest.into_state().map(|summaries| {
        summaries
            .into_iter()
            .filter(|s| matches_search(s, &term))
            .map(|s| SummaryView::new(s, Some(&term)))
            .collect()
    });
    Json(views)
}

pub async fn get_focus(State(state): State<Arc<AppState>>) -> Json<FocusSnapshot> {
    Json(state.focus.snapshot().await)
}

pub async fn select_focus(
    State(state): State<Arc<AppState>>,
    Path(leaning): Path<String>,
) -> Result<Json<FocusSnapshot>, ApiError> {
    let leaning: Leaning = leaning.parse().map_err(|e: uw_core::Error| ApiError {
        status: StatusCode::BAD_REQUEST,
        message: e.to_string(),
    })?;
    Ok(Json(state.focus.select(leaning).await))
}

pub async fn close_focus(State(state): State<Arc<AppState>>) -> Json<FocusSnapshot> {
    Json(state.focus.close().await)
}

pub async fn get_coverage(State(state): State<Arc<AppState>>) -> Json<FetchState<CoverageStats>> {
    Json(state.briefer.fetch_coverage_stats().await.into())
}

pub async fn get_timeline(State(state): State<Arc<AppState>>) -> Json<FetchState<Vec<TimelineDataPoint>>> {
    let mut cached = state.timeline.lock().await;
    if let Some(points) = cached.as_ref() {
        return Json(FetchState::Success(points.clone()));
    }
    match state.briefer.fetch_coverage_timeline().await {
        Ok(points) => {
            *cached = Some(points.clone());
            Json(FetchState::Success(points))
        }
        Err(e) => Json(FetchState::Error(e.to_string())),
    }
}
