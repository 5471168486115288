//! Error types surfaced by the store and the quiz core, plus their HTTP
//! mappings. No operation is retried automatically; every failure here is
//! terminal for the attempt and reported to the caller.

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
  #[error("riddle not found: {0}")]
  NotFound(String),
  #[error("duplicate riddle id: {0}")]
  Duplicate(String),
  #[error("riddle rejected: {0}")]
  InvalidRecord(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QuizError {
  /// The pool was empty (or the read produced no data); a session is never
  /// started with zero items.
  #[error("no riddles available")]
  NoRiddles,
  /// Submit precondition: the stored answer is empty after trimming.
  #[error("answer is empty")]
  EmptyAnswer,
  #[error("quiz already completed")]
  AlreadyCompleted,
  #[error("unknown quiz session: {0}")]
  UnknownSession(String),
}

#[derive(Debug, serde::Serialize)]
struct ErrorBody {
  message: String,
}

fn error_response(status: StatusCode, message: String) -> axum::response::Response {
  (status, Json(ErrorBody { message })).into_response()
}

impl IntoResponse for StoreError {
  fn into_response(self) -> axum::response::Response {
    let status = match self {
      StoreError::NotFound(_) => StatusCode::NOT_FOUND,
      StoreError::Duplicate(_) => StatusCode::CONFLICT,
      StoreError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    error_response(status, self.to_string())
  }
}

impl IntoResponse for QuizError {
  fn into_response(self) -> axum::response::Response {
    let status = match self {
      QuizError::NoRiddles => StatusCode::NOT_FOUND,
      QuizError::EmptyAnswer => StatusCode::UNPROCESSABLE_ENTITY,
      QuizError::AlreadyCompleted => StatusCode::CONFLICT,
      QuizError::UnknownSession(_) => StatusCode::NOT_FOUND,
    };
    error_response(status, self.to_string())
  }
}
