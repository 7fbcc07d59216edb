use std::{
  backtrace::{Backtrace, BacktraceStatus},
  fmt::Display,
};

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use strum::{AsRefStr, Display as StrumDisplay};
use utoipa::ToSchema;

use crate::similarity::SimilarityError;

/// Machine-readable error code returned in the `error` field of every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, StrumDisplay, Serialize, ToSchema)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  RequestError,
  MissingApiKey,
  InvalidApiKey,
  QuotaExceeded,
  ModelUnavailable,
  ModelLoading,
  InvalidInput,
  ApiError,
  InternalError,
}

impl ErrorKind {
  #[must_use]
  pub const fn status_code(self) -> StatusCode {
    match self {
      Self::RequestError | Self::ModelUnavailable => StatusCode::BAD_REQUEST,
      Self::MissingApiKey | Self::InvalidApiKey => StatusCode::UNAUTHORIZED,
      Self::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
      Self::ModelLoading => StatusCode::SERVICE_UNAVAILABLE,
      Self::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
      Self::ApiError => StatusCode::BAD_GATEWAY,
      Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Classify a non-success status returned by the inference service.
  #[must_use]
  pub const fn from_upstream_status(status: u16) -> Self {
    match status {
      400 | 422 => Self::RequestError,
      401 | 403 => Self::InvalidApiKey,
      402 | 429 => Self::QuotaExceeded,
      404 => Self::ModelUnavailable,
      503 => Self::ModelLoading,
      _ => Self::ApiError,
    }
  }

  /// User-facing message used when the upstream text is only kept as details.
  #[must_use]
  pub const fn message(self) -> &'static str {
    match self {
      Self::RequestError => "Invalid request format",
      Self::MissingApiKey => "No API key provided. Please configure your Hugging Face API key.",
      Self::InvalidApiKey => "Invalid API key. Please check your Hugging Face API key.",
      Self::QuotaExceeded => {
        "Monthly Hugging Face API credits exceeded. Please upgrade to Pro or use your own API key."
      }
      Self::ModelUnavailable => {
        "The model is not available through the Inference API. Try a different model."
      }
      Self::ModelLoading => "The model is currently loading. Please wait a moment and try again.",
      Self::InvalidInput => "The inputs could not be compared.",
      Self::ApiError => "The inference request failed. Please try again later.",
      Self::InternalError => "Something went wrong.",
    }
  }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
  pub error: ErrorKind,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
  err: anyhow::Error,
  status_code: StatusCode,
  kind: ErrorKind,
  details: Option<String>,
}

impl AppError {
  /// Create with 500 status
  pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
    Self::with_kind(ErrorKind::InternalError, err)
  }

  /// Create with the status implied by `kind`
  pub fn with_kind<E: Into<anyhow::Error>>(kind: ErrorKind, err: E) -> Self {
    Self {
      err: err.into(),
      status_code: kind.status_code(),
      kind,
      details: None,
    }
  }

  /// Shorthand for a 400 `request_error` carrying `message`.
  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::RequestError, anyhow::anyhow!(message.into()))
  }

  /// Vectors that cannot be compared.
  pub fn invalid_input(err: SimilarityError) -> Self {
    Self::with_kind(ErrorKind::InvalidInput, err)
  }

  /// Map a failed inference call by its HTTP status.
  ///
  /// The upstream text is not shown as the message, only as details.
  pub fn upstream(status: u16, upstream_message: impl Into<String>) -> Self {
    let kind = ErrorKind::from_upstream_status(status);
    Self::with_kind(kind, anyhow::anyhow!(kind.message()))
      .with_details(format!("[{status}] {}", upstream_message.into()))
  }

  #[must_use]
  pub fn with_details(mut self, details: impl Into<String>) -> Self {
    self.details = Some(details.into());
    self
  }

  #[must_use]
  pub const fn status_code(&self) -> StatusCode {
    self.status_code
  }

  #[must_use]
  pub const fn kind(&self) -> ErrorKind {
    self.kind
  }

  #[must_use]
  pub fn details(&self) -> Option<&str> {
    self.details.as_deref()
  }

  /// Get backtrace from anyhow (requires `RUST_BACKTRACE=1` to capture)
  pub fn backtrace(&self) -> &Backtrace {
    self.err.backtrace()
  }

  #[must_use]
  pub fn body(&self) -> ErrorBody {
    let details = match &self.details {
      Some(details) => Some(details.clone()),
      None if cfg!(debug_assertions) && self.status_code.is_server_error() => {
        let bt = self.backtrace();
        (bt.status() == BacktraceStatus::Captured).then(|| format!("Backtrace:\n{bt}"))
      }
      None => None,
    };

    ErrorBody {
      error: self.kind,
      message: self.err.to_string(),
      details,
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    if self.status_code.is_server_error() {
      tracing::error!(kind = %self.kind, details = ?self.details, "{:#}", self.err);
    } else {
      tracing::warn!(kind = %self.kind, details = ?self.details, "{:#}", self.err);
    }

    (self.status_code, Json(self.body())).into_response()
  }
}

impl Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] {}", self.status_code, self.err)
  }
}

impl<E> From<E> for AppError
where
  E: Into<anyhow::Error>,
{
  fn from(err: E) -> Self {
    Self::new(err)
  }
}
