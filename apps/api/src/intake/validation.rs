//! Parse-and-validate boundary between untrusted profile JSON (from the
//! extraction model or a client) and the `Profile` the engine ranks.
//!
//! Required: `telegram_id`, `user_score`, `portfolio_summary` (may be empty).
//! Defaulted: `username` → "", list fields → empty, `portfolio_strength` → 1.
//! Rejected: negative scores, portfolio strength outside 1–5, numbers that
//! do not parse.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::matching::profile::Profile;
use crate::store::{ApplicantId, ApplicantRecord};

pub const MIN_PORTFOLIO_STRENGTH: i64 = 1;
pub const MAX_PORTFOLIO_STRENGTH: i64 = 5;
const DEFAULT_PORTFOLIO_STRENGTH: i64 = 1;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("malformed profile: {0}")]
    Malformed(String),

    #[error("message text cannot be empty")]
    EmptyText,
}

/// An integer the model may have written as a number, a float or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseInt {
    fn resolve(&self, field: &'static str) -> Result<i64, IntakeError> {
        match self {
            LooseInt::Int(value) => Ok(*value),
            LooseInt::Float(value) => float_to_int(*value, field),
            LooseInt::Text(raw) => {
                let raw = raw.trim();
                if let Ok(value) = raw.parse::<i64>() {
                    return Ok(value);
                }
                let value = raw.parse::<f64>().map_err(|_| IntakeError::InvalidField {
                    field,
                    reason: format!("'{raw}' is not a number"),
                })?;
                float_to_int(value, field)
            }
        }
    }
}

fn float_to_int(value: f64, field: &'static str) -> Result<i64, IntakeError> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return Err(IntakeError::InvalidField {
            field,
            reason: format!("{value} is out of range"),
        });
    }
    Ok(rounded as i64)
}

/// A list of strings, or a single comma/semicolon separated string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseList {
    Many(Vec<String>),
    One(String),
}

impl LooseList {
    fn into_items(self) -> Vec<String> {
        let items = match self {
            LooseList::Many(items) => items,
            LooseList::One(joined) => joined
                .split(|c: char| c == ',' || c == ';')
                .map(str::to_string)
                .collect(),
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// Profile JSON as it arrives. Field names follow the extraction prompt;
/// the short names are accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfile {
    pub telegram_id: Option<LooseInt>,
    pub username: Option<String>,
    #[serde(alias = "interests")]
    pub main_interests: Option<LooseList>,
    #[serde(alias = "score")]
    pub user_score: Option<LooseInt>,
    #[serde(alias = "summary")]
    pub portfolio_summary: Option<String>,
    #[serde(alias = "strength")]
    pub portfolio_strength: Option<LooseInt>,
    #[serde(alias = "cities")]
    pub desired_cities: Option<LooseList>,
    #[serde(alias = "undesired_institutions", alias = "no_go_uni")]
    pub undesired_universities: Option<LooseList>,
}

impl RawProfile {
    /// Builds a raw profile from model output, attaching the sender's
    /// identity from the chat request rather than trusting the model.
    pub fn from_extraction(
        extracted: Value,
        telegram_id: ApplicantId,
        username: Option<String>,
    ) -> Result<Self, IntakeError> {
        if !extracted.is_object() {
            return Err(IntakeError::Malformed(
                "extraction result is not a JSON object".to_string(),
            ));
        }
        let mut raw: RawProfile =
            serde_json::from_value(extracted).map_err(|e| IntakeError::Malformed(e.to_string()))?;
        raw.telegram_id = Some(LooseInt::Int(telegram_id));
        raw.username = username;
        Ok(raw)
    }
}

/// A validated profile plus the applicant it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantProfile {
    pub telegram_id: ApplicantId,
    pub username: String,
    pub profile: Profile,
}

impl ApplicantProfile {
    pub fn into_record(self, received_at: DateTime<Utc>) -> ApplicantRecord {
        ApplicantRecord {
            telegram_id: self.telegram_id,
            username: self.username,
            profile: self.profile,
            received_at,
        }
    }
}

pub fn validate_profile(raw: RawProfile) -> Result<ApplicantProfile, IntakeError> {
    let telegram_id = raw
        .telegram_id
        .ok_or(IntakeError::MissingField("telegram_id"))?
        .resolve("telegram_id")?;

    let score = raw
        .user_score
        .ok_or(IntakeError::MissingField("user_score"))?
        .resolve("user_score")?;
    if score < 0 {
        return Err(IntakeError::InvalidField {
            field: "user_score",
            reason: format!("{score} is negative"),
        });
    }

    let portfolio_summary = raw
        .portfolio_summary
        .ok_or(IntakeError::MissingField("portfolio_summary"))?
        .trim()
        .to_string();

    let portfolio_strength = match raw.portfolio_strength {
        Some(value) => value.resolve("portfolio_strength")?,
        None => DEFAULT_PORTFOLIO_STRENGTH,
    };
    if !(MIN_PORTFOLIO_STRENGTH..=MAX_PORTFOLIO_STRENGTH).contains(&portfolio_strength) {
        return Err(IntakeError::InvalidField {
            field: "portfolio_strength",
            reason: format!(
                "{portfolio_strength} is outside {MIN_PORTFOLIO_STRENGTH}-{MAX_PORTFOLIO_STRENGTH}"
            ),
        });
    }

    Ok(ApplicantProfile {
        telegram_id,
        username: raw.username.unwrap_or_default().trim().to_string(),
        profile: Profile {
            interests: list_items(raw.main_interests),
            score,
            portfolio_summary,
            portfolio_strength,
            desired_cities: dedup_fold(list_items(raw.desired_cities)),
            undesired_institutions: dedup_fold(list_items(raw.undesired_universities)),
        },
    })
}

fn list_items(list: Option<LooseList>) -> Vec<String> {
    list.map(LooseList::into_items).unwrap_or_default()
}

/// Case-insensitive de-duplication; the first spelling wins.
fn dedup_fold(items: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        let folded = item.to_lowercase();
        if !seen.contains(&folded) {
            seen.push(folded);
            kept.push(item);
        }
    }
    kept
}
