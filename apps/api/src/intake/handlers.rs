//! Axum route handlers for profile intake and lookup.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::intake::validation::{validate_profile, ApplicantProfile, IntakeError, RawProfile};
use crate::llm_client::LlmError;
use crate::state::AppState;
use crate::store::{ApplicantId, ApplicantRecord};

const SUMMARY_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub telegram_id: ApplicantId,
    #[serde(default)]
    pub username: Option<String>,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileAccepted {
    pub status: &'static str,
    pub telegram_id: ApplicantId,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub status: &'static str,
    pub summary_preview: String,
    pub applicant: ApplicantRecord,
}

/// POST /api/v1/profiles
///
/// Accepts a profile that was already extracted (e.g. by the chat bot),
/// validates it and stores it under its telegram id.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    AppJson(raw): AppJson<RawProfile>,
) -> Result<Json<ProfileAccepted>, AppError> {
    let applicant = validate_profile(raw)?;
    let record = store_applicant(&state, applicant).await?;
    Ok(Json(ProfileAccepted {
        status: "accepted",
        telegram_id: record.telegram_id,
    }))
}

/// POST /api/v1/profiles/extract
///
/// Runs the applicant's free-text message through the extraction model,
/// then validates and stores the result.
pub async fn handle_extract_profile(
    State(state): State<AppState>,
    AppJson(request): AppJson<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(IntakeError::EmptyText.into());
    }
    let extractor = state
        .extractor
        .as_ref()
        .ok_or(AppError::ExtractionDisabled)?;

    let extracted = extractor
        .extract(&request.text)
        .await
        .map_err(|e| match e {
            LlmError::Parse(_) | LlmError::EmptyContent => AppError::UnprocessableEntity(format!(
                "Could not read a profile from the message: {e}"
            )),
            other => AppError::Llm(format!("Profile extraction failed: {other}")),
        })?;

    let raw = RawProfile::from_extraction(extracted, request.telegram_id, request.username)?;
    let applicant = validate_profile(raw)?;
    let record = store_applicant(&state, applicant).await?;

    Ok(Json(ExtractResponse {
        status: "accepted",
        summary_preview: summary_preview(&record.profile.portfolio_summary),
        applicant: record,
    }))
}

/// GET /api/v1/profiles/:telegram_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AppPath(telegram_id): AppPath<ApplicantId>,
) -> Result<Json<ApplicantRecord>, AppError> {
    let record = state
        .store
        .get(telegram_id)
        .await?
        .ok_or_else(|| unknown_applicant(telegram_id))?;
    Ok(Json(record))
}

pub fn unknown_applicant(telegram_id: ApplicantId) -> AppError {
    AppError::NotFound(format!(
        "Applicant {telegram_id} not found; send your description to the bot first"
    ))
}

async fn store_applicant(
    state: &AppState,
    applicant: ApplicantProfile,
) -> Result<ApplicantRecord, AppError> {
    let record = applicant.into_record(Utc::now());
    info!(
        telegram_id = record.telegram_id,
        interests = record.profile.interests.len(),
        desired_cities = record.profile.desired_cities.len(),
        "Stored applicant profile"
    );
    state.store.put(record.clone()).await?;
    Ok(record)
}

/// First characters of the portfolio summary, cut on a char boundary.
fn summary_preview(summary: &str) -> String {
    let mut chars = summary.chars();
    let preview: String = chars.by_ref().take(SUMMARY_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}
