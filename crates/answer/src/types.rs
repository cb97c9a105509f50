//! Answer pipeline types.

use serde::{Deserialize, Serialize};
use wikiqa_core::{AppError, AppResult};

/// Longest question accepted, in characters.
pub const MAX_QUESTION_CHARS: usize = 1000;

/// A validated question. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Validate raw input.
    ///
    /// Rejects blank input and anything longer than [`MAX_QUESTION_CHARS`]
    /// characters with `AppError::Validation`.
    pub fn parse(raw: &str) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Err(AppError::Validation("Question must not be empty".to_string()));
        }

        let length = raw.chars().count();
        if length > MAX_QUESTION_CHARS {
            return Err(AppError::Validation(format!(
                "Question is too long ({} characters, maximum is {})",
                length, MAX_QUESTION_CHARS
            )));
        }

        Ok(Self(raw.to_string()))
    }

    /// The question text exactly as submitted.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The pipeline's only externally visible output.
///
/// Built through [`AnswerResult::answered`], [`AnswerResult::no_results`] or
/// [`AnswerResult::failure`], which keep the invariant that a failed result
/// has an error message and no response text.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerResult {
    success: bool,
    response_text: Option<String>,
    source_titles: Vec<String>,
    processing_time_ms: u64,
    error_message: Option<String>,
}

impl AnswerResult {
    /// A synthesized answer citing `source_titles` in search rank order.
    pub fn answered(response: String, source_titles: Vec<String>, processing_time_ms: u64) -> Self {
        Self {
            success: true,
            response_text: Some(response),
            source_titles,
            processing_time_ms,
            error_message: None,
        }
    }

    /// A successful answer explaining that nothing matched.
    pub fn no_results(response: String, processing_time_ms: u64) -> Self {
        Self {
            success: true,
            response_text: Some(response),
            source_titles: Vec::new(),
            processing_time_ms,
            error_message: None,
        }
    }

    /// A failed answer carrying the error's message.
    pub fn failure(error: &AppError, processing_time_ms: u64) -> Self {
        Self {
            success: false,
            response_text: None,
            source_titles: Vec::new(),
            processing_time_ms,
            error_message: Some(error.to_string()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn response_text(&self) -> Option<&str> {
        self.response_text.as_deref()
    }

    pub fn source_titles(&self) -> &[String] {
        &self.source_titles
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Convert to the wire payload handed to HTTP and CLI callers.
    pub fn to_payload(&self) -> AnswerPayload {
        AnswerPayload::from(self)
    }
}

/// Wire shape: `{ success, response?, sources?, processingTime?, error? }`.
///
/// Successful payloads always carry `sources`, which is `[]` for the
/// no-result answer. Failed payloads carry `error` and omit `response` and
/// `sources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,

    /// Milliseconds spent answering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&AnswerResult> for AnswerPayload {
    fn from(result: &AnswerResult) -> Self {
        if result.success {
            Self {
                success: true,
                response: result.response_text.clone(),
                sources: Some(result.source_titles.clone()),
                processing_time: Some(result.processing_time_ms),
                error: None,
            }
        } else {
            Self {
                success: false,
                response: None,
                sources: None,
                processing_time: Some(result.processing_time_ms),
                error: result.error_message.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_bounds() {
        assert!(Question::parse("").is_err());
        assert!(Question::parse("   \n").is_err());
        assert!(Question::parse(&"a".repeat(MAX_QUESTION_CHARS)).is_ok());
        assert!(matches!(
            Question::parse(&"a".repeat(MAX_QUESTION_CHARS + 1)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_question_counts_characters_not_bytes() {
        let question = "é".repeat(MAX_QUESTION_CHARS);
        assert!(question.len() > MAX_QUESTION_CHARS);
        assert!(Question::parse(&question).is_ok());
    }

    #[test]
    fn test_failure_invariant() {
        let result = AnswerResult::failure(&AppError::Upstream("timeout".to_string()), 12);

        assert!(!result.success());
        assert!(result.response_text().is_none());
        assert_eq!(result.error_message(), Some("Upstream error: timeout"));
        assert!(result.source_titles().is_empty());
    }

    #[test]
    fn test_answered_payload_shape() {
        let result = AnswerResult::answered(
            "Answer".to_string(),
            vec!["Rust".to_string(), "Cargo".to_string()],
            42,
        );
        let json = serde_json::to_value(result.to_payload()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "response": "Answer",
                "sources": ["Rust", "Cargo"],
                "processingTime": 42
            })
        );
    }

    #[test]
    fn test_no_results_payload_has_empty_sources() {
        let result = AnswerResult::no_results("Nothing found".to_string(), 7);
        let json = serde_json::to_value(result.to_payload()).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["sources"], serde_json::json!([]));
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_payload_shape() {
        let result = AnswerResult::failure(&AppError::NotFound("Foo".to_string()), 3);
        let json = serde_json::to_value(result.to_payload()).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Not found: Foo");
        assert!(json.get("response").is_none());
        assert!(json.get("sources").is_none());
    }
}
