//! Profile extraction: turns an applicant's free-text message into
//! untrusted profile JSON.
//!
//! `AppState` carries an `Option<Arc<dyn ProfileExtractor>>`; it is `None`
//! when no model API key is configured, which disables the extract endpoint.
//! The output is never trusted: it always goes through `validate_profile`.

use async_trait::async_trait;
use serde_json::Value;

use crate::intake::prompts::{PROFILE_EXTRACT_PROMPT, PROFILE_EXTRACT_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

#[async_trait]
pub trait ProfileExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Value, LlmError>;
}

/// Extraction backed by the service's single `LlmClient`.
pub struct LlmProfileExtractor(pub LlmClient);

#[async_trait]
impl ProfileExtractor for LlmProfileExtractor {
    async fn extract(&self, text: &str) -> Result<Value, LlmError> {
        let prompt = build_prompt(text);
        self.0.call_json::<Value>(&prompt, PROFILE_EXTRACT_SYSTEM).await
    }
}

fn build_prompt(text: &str) -> String {
    PROFILE_EXTRACT_PROMPT.replace("{text}", text.trim())
}
