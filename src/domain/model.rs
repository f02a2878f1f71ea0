use crate::domain::error::NlqError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const VALIDATION_MESSAGE: &str = "Please enter a query.";

/// A query that passed local validation and may be sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    query: String,
}

impl QueryRequest {
    /// Accepts the text as entered; rejects it when nothing but whitespace remains.
    pub fn new(text: impl Into<String>) -> Result<Self, NlqError> {
        let query = text.into();
        if query.trim().is_empty() {
            return Err(NlqError::EmptyQuery);
        }
        Ok(Self { query })
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

// What the backend sends back, before validation
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    sql_query: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
}

/// Backend answer, decoded at the boundary
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    Error { message: String },
    Success { sql_query: String, result: Value },
}

impl QueryResponse {
    /// Decode a response body.
    ///
    /// The body must be a JSON object. A falsy `error` (`null`, `false`, `0`,
    /// `""`) counts as absent. Non-string error values are kept as their JSON
    /// text. A success body must carry a string `sql_query`; a missing `result`
    /// becomes `null`.
    pub fn from_slice(body: &[u8]) -> Result<Self, NlqError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, NlqError> {
        // A derived struct visitor would also accept arrays by position
        if !value.is_object() {
            return Err(NlqError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                value
            )));
        }
        let raw: RawResponse = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawResponse) -> Result<Self, NlqError> {
        match raw.error {
            None | Some(Value::Null) | Some(Value::Bool(false)) => {}
            Some(Value::String(message)) if message.is_empty() => {}
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {}
            Some(Value::String(message)) => return Ok(Self::Error { message }),
            Some(other) => {
                return Ok(Self::Error {
                    message: other.to_string(),
                })
            }
        }

        match raw.sql_query {
            Some(Value::String(sql_query)) => Ok(Self::Success {
                sql_query,
                result: raw.result.unwrap_or(Value::Null),
            }),
            Some(other) => Err(NlqError::MalformedResponse(format!(
                "sql_query is not a string: {}",
                other
            ))),
            None => Err(NlqError::MalformedResponse(
                "response has neither error nor sql_query".to_string(),
            )),
        }
    }
}

/// What one submission produced; the renderer's input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    InvalidInput { message: String },
    Answered { sql_query: String, result: Value },
    Rejected { message: String },
    Failed { detail: String },
}

impl Outcome {
    pub fn invalid_input() -> Self {
        Outcome::InvalidInput {
            message: VALIDATION_MESSAGE.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Outcome::Answered { .. })
    }

    /// Process exit status for one-shot mode
    pub fn exit_status(&self) -> u8 {
        if self.is_error() {
            1
        } else {
            0
        }
    }
}

impl From<QueryResponse> for Outcome {
    fn from(response: QueryResponse) -> Self {
        match response {
            QueryResponse::Error { message } => Outcome::Rejected { message },
            QueryResponse::Success { sql_query, result } => {
                Outcome::Answered { sql_query, result }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_rejects_blank_text() {
        assert!(matches!(QueryRequest::new(""), Err(NlqError::EmptyQuery)));
        assert!(matches!(
            QueryRequest::new(" \t\n "),
            Err(NlqError::EmptyQuery)
        ));
    }

    #[test]
    fn test_request_keeps_text_untrimmed() {
        let req = QueryRequest::new("  list employees ").unwrap();
        assert_eq!(req.query(), "  list employees ");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"query": "  list employees "})
        );
    }

    #[test]
    fn test_decode_success() {
        let resp = QueryResponse::from_slice(br#"{"sql_query": "SELECT 1", "result": [1]}"#)
            .unwrap();
        assert_eq!(
            resp,
            QueryResponse::Success {
                sql_query: "SELECT 1".to_string(),
                result: json!([1]),
            }
        );
    }

    #[test]
    fn test_decode_error_wins_over_other_fields() {
        let resp = QueryResponse::from_value(json!({
            "error": "no such table: unknown_table",
            "sql_query": "SELECT * FROM unknown_table;"
        }))
        .unwrap();
        assert_eq!(
            resp,
            QueryResponse::Error {
                message: "no such table: unknown_table".to_string()
            }
        );
    }

    #[test]
    fn test_decode_blank_error_is_absent() {
        let resp =
            QueryResponse::from_value(json!({"error": "", "sql_query": "SELECT 1"})).unwrap();
        assert_eq!(
            resp,
            QueryResponse::Success {
                sql_query: "SELECT 1".to_string(),
                result: Value::Null,
            }
        );

        let resp =
            QueryResponse::from_value(json!({"error": null, "sql_query": "SELECT 2", "result": []}))
                .unwrap();
        assert!(matches!(resp, QueryResponse::Success { .. }));
    }

    #[test]
    fn test_decode_rejects_non_object_body() {
        assert!(matches!(
            QueryResponse::from_slice(br#"["bad"]"#),
            Err(NlqError::MalformedResponse(_))
        ));
        assert!(matches!(
            QueryResponse::from_slice(br#"[null, "SELECT 1", [1]]"#),
            Err(NlqError::MalformedResponse(_))
        ));
        assert!(matches!(
            QueryResponse::from_slice(b"\"SELECT 1\""),
            Err(NlqError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_zero_error_is_absent() {
        let resp = QueryResponse::from_value(json!({"error": 0, "sql_query": "SELECT 1", "result": [1]}))
            .unwrap();
        assert_eq!(
            resp,
            QueryResponse::Success {
                sql_query: "SELECT 1".to_string(),
                result: json!([1]),
            }
        );
    }

    #[test]
    fn test_decode_non_string_error() {
        let resp = QueryResponse::from_value(json!({"error": {"code": 42}})).unwrap();
        assert_eq!(
            resp,
            QueryResponse::Error {
                message: r#"{"code":42}"#.to_string()
            }
        );
    }

    #[test]
    fn test_decode_rejects_shapeless_body() {
        assert!(matches!(
            QueryResponse::from_value(json!({"result": [1]})),
            Err(NlqError::MalformedResponse(_))
        ));
        assert!(matches!(
            QueryResponse::from_value(json!({"sql_query": 7})),
            Err(NlqError::MalformedResponse(_))
        ));
        assert!(matches!(
            QueryResponse::from_slice(b"<html>oops</html>"),
            Err(NlqError::Json(_))
        ));
    }

    #[test]
    fn test_outcome_json_tag() {
        let outcome: Outcome = QueryResponse::Success {
            sql_query: "SELECT name, salary FROM employees;".to_string(),
            result: json!([["Alice Johnson", 80000]]),
        }
        .into();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "status": "answered",
                "sql_query": "SELECT name, salary FROM employees;",
                "result": [["Alice Johnson", 80000]]
            })
        );
        assert!(!outcome.is_error());
        assert!(Outcome::invalid_input().is_error());
    }

    #[test]
    fn test_exit_status() {
        let answered = Outcome::Answered {
            sql_query: "SELECT 1".to_string(),
            result: json!([1]),
        };
        assert_eq!(answered.exit_status(), 0);
        assert_eq!(Outcome::invalid_input().exit_status(), 1);
        assert_eq!(
            Outcome::Failed {
                detail: "connection refused".to_string()
            }
            .exit_status(),
            1
        );
    }

    #[test]
    fn test_invalid_input_carries_message() {
        assert_eq!(
            serde_json::to_value(Outcome::invalid_input()).unwrap(),
            json!({"status": "invalid_input", "message": "Please enter a query."})
        );
    }
}
