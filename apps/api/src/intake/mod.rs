// Profile intake: free-text extraction via the LLM client, validation of
// untrusted profile JSON, and the handlers that store the result.

pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod validation;
