//! Turn a fallible future into a value that is either data or an error.
//!
//! Call sites branch on [`Settled`] instead of propagating errors, which lets
//! an endpoint map failure to a response body without unwinding the handler.

use std::fmt::Display;
use std::future::Future;

use serde::{Deserialize, Serialize};

const UNKNOWN_ERROR: &str = "unknown error";

/// Human-readable description of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

impl ErrorPayload {
    /// Build a payload from any displayable error. Never produces an empty message.
    pub fn from_display(err: impl Display) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            Self { message: UNKNOWN_ERROR.to_string() }
        } else {
            Self { message }
        }
    }
}

/// Outcome of a settled future: `{"data": ...}` or `{"error": {"message": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Settled<T> {
    Data { data: T },
    Error { error: ErrorPayload },
}

impl<T> Settled<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Settled::Data { data } => Some(data),
            Settled::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorPayload> {
        match self {
            Settled::Data { .. } => None,
            Settled::Error { error } => Some(error),
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Settled::Data { .. })
    }

    pub fn into_result(self) -> Result<T, ErrorPayload> {
        match self {
            Settled::Data { data } => Ok(data),
            Settled::Error { error } => Err(error),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for Settled<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Settled::Data { data },
            Err(err) => Settled::Error { error: ErrorPayload::from_display(err) },
        }
    }
}

/// Await `fut` and normalize its result. Never fails.
pub async fn settle<T, E, F>(fut: F) -> Settled<T>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    Settled::from(fut.await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    enum Failure {
        #[error("stack not reachable")]
        Unreachable,
        #[error("")]
        Silent,
    }

    #[tokio::test]
    async fn resolved_future_yields_data_only() {
        let settled = settle(async { Ok::<_, Failure>(vec![1, 2, 3]) }).await;
        assert_eq!(settled.data(), Some(&vec![1, 2, 3]));
        assert!(settled.error().is_none());
        assert!(settled.is_data());
    }

    #[tokio::test]
    async fn rejected_future_yields_error_message() {
        let settled = settle(async { Err::<u8, _>(Failure::Unreachable) }).await;
        assert!(settled.data().is_none());
        assert_eq!(settled.error().map(|e| e.message.as_str()), Some("stack not reachable"));
    }

    #[tokio::test]
    async fn empty_error_text_is_replaced() {
        let settled = settle(async { Err::<u8, _>(Failure::Silent) }).await;
        let message = settled.error().map(|e| e.message.clone()).unwrap_or_default();
        assert_eq!(message, "unknown error");
    }

    #[test]
    fn wire_shape_has_exactly_one_key() {
        let ok: Settled<u32> = Ok::<_, String>(7).into();
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({"data": 7}));

        let err: Settled<u32> = Err::<u32, _>("denied".to_string()).into();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"error": {"message": "denied"}})
        );
    }

    #[test]
    fn into_result_round_trips_branches() {
        let ok: Settled<&str> = Ok::<_, String>("x").into();
        assert_eq!(ok.into_result(), Ok("x"));
        let err: Settled<&str> = Err::<&str, _>("   ").into();
        assert_eq!(err.into_result().unwrap_err().message, "unknown error");
    }
}
