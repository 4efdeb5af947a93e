//! Axum route handlers for the catalog and recommendations.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::AppPath;
use crate::intake::handlers::unknown_applicant;
use crate::matching::engine::{rank, Recommendation};
use crate::state::AppState;
use crate::store::{ApplicantId, ApplicantRecord};

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse<'a> {
    pub profile: &'a ApplicantRecord,
    pub recommendations: Vec<Recommendation<'a>>,
}

/// GET /api/v1/catalog
pub async fn handle_get_catalog(State(state): State<AppState>) -> Response {
    Json(state.catalog.as_ref()).into_response()
}

/// GET /api/v1/recommendations/:telegram_id
///
/// Looks up the stored profile and returns the engine's ranking verbatim.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    AppPath(telegram_id): AppPath<ApplicantId>,
) -> Result<Response, AppError> {
    let applicant = state
        .store
        .get(telegram_id)
        .await?
        .ok_or_else(|| unknown_applicant(telegram_id))?;

    let recommendations = rank(&applicant.profile, &state.catalog);
    info!(
        telegram_id,
        returned = recommendations.len(),
        "Served recommendations"
    );

    Ok(Json(RecommendationsResponse {
        profile: &applicant,
        recommendations,
    })
    .into_response())
}
