use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use data_loader::{GameId, UserId};
use recommender::Recommendation;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Upper bound on the number of recommendations a request may ask for
pub const MAX_COUNT: usize = 20;
/// Count used when the caller doesn't specify one
pub const DEFAULT_COUNT: usize = 10;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub user_id: UserId,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub app_id: GameId,
    pub title: String,
    /// Full-precision predicted rating; rounding is a rendering concern
    pub score: f32,
}

impl From<&Recommendation> for RecommendationResponse {
    fn from(rec: &Recommendation) -> Self {
        Self {
            app_id: rec.app_id,
            title: rec.title.clone(),
            score: rec.score,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub user_id: UserId,
    pub count: Option<usize>,
}

fn resolve_count(count: Option<usize>) -> AppResult<usize> {
    let count = count.unwrap_or(DEFAULT_COUNT);
    if !(1..=MAX_COUNT).contains(&count) {
        return Err(AppError::InvalidInput(format!(
            "count must be between 1 and {}",
            MAX_COUNT
        )));
    }
    Ok(count)
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All user ids known to the interactions table
pub async fn get_users(State(state): State<AppState>) -> Json<Vec<UserId>> {
    Json(state.index.known_users().to_vec())
}

/// Rank the target user's unrated games and return the top N as JSON
pub async fn api_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let count = resolve_count(request.count)?;
    let recommendations = state.recommender.recommend(request.user_id, count)?;
    Ok(Json(
        recommendations.iter().map(RecommendationResponse::from).collect(),
    ))
}

/// The landing form: pick a user and a count, submit to /recommendations
pub async fn index_page(State(state): State<AppState>) -> Html<String> {
    let mut options = String::new();
    for &user_id in state.index.known_users() {
        options.push_str(&format!("<option value=\"{0}\">{0}</option>", user_id));
    }

    Html(format!(
        "<!DOCTYPE html>\
         <html><head><title>Steam Game Recommendations</title></head>\
         <body>\
         <h1>Steam Game Recommendations</h1>\
         <form action=\"/recommendations\" method=\"get\">\
         <label>User: <select name=\"user_id\">{options}</select></label> \
         <label>Number of recommendations: \
         <input type=\"number\" name=\"count\" min=\"1\" max=\"{MAX_COUNT}\" value=\"{DEFAULT_COUNT}\">\
         </label> \
         <button type=\"submit\">Recommend</button>\
         </form>\
         </body></html>"
    ))
}

/// Results page: ranked titles with scores rendered to two decimals
pub async fn recommendations_page(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
) -> AppResult<Html<String>> {
    let count = resolve_count(query.count)?;
    let recommendations = state.recommender.recommend(query.user_id, count)?;

    let mut rows = String::new();
    for rec in &recommendations {
        rows.push_str(&format!(
            "<li>{} &mdash; {:.2}</li>",
            escape_html(&rec.title),
            rec.score
        ));
    }

    Ok(Html(format!(
        "<!DOCTYPE html>\
         <html><head><title>Recommendations for user {user_id}</title></head>\
         <body>\
         <h1>Top {n} games for user {user_id}</h1>\
         <ol>{rows}</ol>\
         <p><a href=\"/\">Back</a></p>\
         </body></html>",
        user_id = query.user_id,
        n = recommendations.len(),
    )))
}

/// Titles come from an external file; escape them before interpolation
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
