use std::collections::HashMap;

use anyhow::anyhow;
use axum::{
  Json,
  extract::{FromRequest, Multipart, Request},
};
use bytes::Bytes;
use hfplay_shared::{AppError, ErrorKind};
use serde::de::DeserializeOwned;

/// `Json` whose rejection is reported as a `request_error` body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(|rejection| {
        AppError::with_kind(
          ErrorKind::RequestError,
          anyhow!(ErrorKind::RequestError.message()),
        )
        .with_details(rejection.body_text())
      })?;
    Ok(Self(value))
  }
}

/// A fully buffered `multipart/form-data` body, keyed by field name.
#[derive(Debug, Default)]
pub struct Form {
  fields: HashMap<String, Bytes>,
}

impl Form {
  /// Take a non-empty part.
  pub fn file(&mut self, name: &str) -> Option<Bytes> {
    self.fields.remove(name).filter(|data| !data.is_empty())
  }

  /// Take a non-blank text part. A part that is not UTF-8 is a `request_error`.
  pub fn text(&mut self, name: &str) -> Result<Option<String>, AppError> {
    let Some(data) = self.fields.remove(name) else {
      return Ok(None);
    };
    let value = String::from_utf8(data.to_vec())
      .map_err(|_| AppError::bad_request(format!("{name} must be valid UTF-8")))?;
    Ok(Some(value).filter(|value| !value.trim().is_empty()))
  }
}

fn form_error(details: String) -> AppError {
  AppError::with_kind(
    ErrorKind::RequestError,
    anyhow!(ErrorKind::RequestError.message()),
  )
  .with_details(details)
}

impl<S> FromRequest<S> for Form
where
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let mut multipart = Multipart::from_request(req, state)
      .await
      .map_err(|rejection| form_error(rejection.body_text()))?;

    let mut fields = HashMap::new();
    while let Some(field) = multipart
      .next_field()
      .await
      .map_err(|err| form_error(err.body_text()))?
    {
      let Some(name) = field.name().map(str::to_owned) else {
        continue;
      };
      let data = field
        .bytes()
        .await
        .map_err(|err| form_error(err.body_text()))?;
      fields.insert(name, data);
    }

    Ok(Self { fields })
  }
}

/// Trimmed `value`, or a 400 naming `field` when it is blank.
pub fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
  let value = value.trim();
  if value.is_empty() {
    return Err(AppError::bad_request(format!("{field} cannot be empty")));
  }
  Ok(value)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn required_trims_and_rejects_blank() {
    assert_eq!(required("  hi ", "text").unwrap(), "hi");
    let err = required(" \n", "text").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestError);
    assert_eq!(err.body().message, "text cannot be empty");
  }

  #[test]
  fn form_skips_blank_parts() {
    let mut form = Form::default();
    form.fields.insert("image".to_owned(), Bytes::new());
    form.fields.insert("task".to_owned(), Bytes::from_static(b"  "));
    form.fields.insert("question".to_owned(), Bytes::from_static(b"why?"));

    assert!(form.file("image").is_none());
    assert!(form.text("task").unwrap().is_none());
    assert_eq!(form.text("question").unwrap().as_deref(), Some("why?"));
    assert!(form.text("question").unwrap().is_none());
  }

  #[test]
  fn form_rejects_non_utf8_text() {
    let mut form = Form::default();
    form.fields.insert("apiKey".to_owned(), Bytes::from_static(b"hf_\xff\xfe"));

    let err = form.text("apiKey").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestError);
    assert_eq!(err.body().message, "apiKey must be valid UTF-8");
  }
}
