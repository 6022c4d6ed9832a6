//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is rendered as
//! `{"error": {"message": ..., "code": "NOT_FOUND", "httpStatus": 404}}`
//! with the same status on the HTTP response.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::ErrorCode;
use serde::Serialize;
use thiserror::Error;

/// An error returned by a procedure handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request could not be decoded into the procedure's input type.
  #[error("invalid input: {0}")]
  Decode(String),

  #[error(transparent)]
  Procedure(#[from] roster_core::Error),
}

impl ApiError {
  pub fn code(&self) -> ErrorCode {
    match self {
      ApiError::Decode(_) => ErrorCode::InvalidInput,
      ApiError::Procedure(e) => e.code(),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self.code() {
      ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
      ErrorCode::NotFound => StatusCode::NOT_FOUND,
      ErrorCode::Conflict => StatusCode::CONFLICT,
      ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
  error: ErrorShape,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorShape {
  message:     String,
  code:        ErrorCode,
  http_status: u16,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let code = self.code();
    if code == ErrorCode::Internal {
      tracing::error!(error = %self, "procedure failed");
    } else {
      tracing::debug!(code = code.as_str(), error = %self, "procedure rejected");
    }

    let body = ErrorBody {
      error: ErrorShape {
        message: self.to_string(),
        code,
        http_status: status.as_u16(),
      },
    };
    (status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::*;

  async fn render(err: ApiError) -> (StatusCode, Value) {
    let resp = err.into_response();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn store_fault_is_internal_500() {
    let fault = std::io::Error::other("disk unplugged");
    let err = ApiError::from(roster_core::Error::Internal(Box::new(fault)));

    let (status, body) = render(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
      body,
      json!({
        "error": {
          "message": "internal error: disk unplugged",
          "code": "INTERNAL",
          "httpStatus": 500
        }
      })
    );
  }

  #[tokio::test]
  async fn every_code_has_a_status() {
    let cases = [
      (ApiError::Decode("bad".into()), StatusCode::BAD_REQUEST, "INVALID_INPUT"),
      (
        roster_core::Error::NotFound("gone".into()).into(),
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
      ),
      (
        roster_core::Error::Conflict("taken".into()).into(),
        StatusCode::CONFLICT,
        "CONFLICT",
      ),
    ];
    for (err, want_status, want_code) in cases {
      let (status, body) = render(err).await;
      assert_eq!(status, want_status);
      assert_eq!(body["error"]["code"], want_code);
      assert_eq!(body["error"]["httpStatus"], want_status.as_u16());
    }
  }
}
