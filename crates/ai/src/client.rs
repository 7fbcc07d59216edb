use std::time::Duration;

use anyhow::anyhow;
use bytes::Bytes;
use hfplay_shared::{APP_ENV, AppError, ErrorKind};
use reqwest::{
  RequestBuilder, Response,
  header::{CONTENT_TYPE, HeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Body shared by every JSON task: `{"inputs": ..., "parameters": ...}`.
#[derive(Debug, Serialize)]
pub struct Payload<I, P = ()> {
  pub inputs: I,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parameters: Option<P>,
}

impl<I> Payload<I> {
  pub const fn new(inputs: I) -> Self {
    Self {
      inputs,
      parameters: None,
    }
  }
}

impl<I, P> Payload<I, P> {
  pub const fn with_parameters(inputs: I, parameters: P) -> Self {
    Self {
      inputs,
      parameters: Some(parameters),
    }
  }
}

/// Binary output of a generation task (image or audio).
#[derive(Debug, Clone)]
pub struct Media {
  pub content_type: String,
  pub bytes: Bytes,
}

#[derive(Clone, Debug)]
pub struct InferenceClient {
  http: reqwest::Client,
  base_url: String,
  api_key: Option<String>,
}

impl InferenceClient {
  pub fn new(
    base_url: impl Into<String>,
    api_key: Option<String>,
    timeout: Duration,
  ) -> Result<Self, AppError> {
    let http = reqwest::Client::builder().timeout(timeout).build()?;
    let base_url = base_url.into().trim_end_matches('/').to_owned();

    Ok(Self {
      http,
      base_url,
      api_key,
    })
  }

  pub fn from_env() -> Result<Self, AppError> {
    Self::new(
      &APP_ENV.huggingface_base_url,
      APP_ENV.huggingface_api_key.clone(),
      APP_ENV.huggingface_timeout,
    )
  }

  /// Bind an API key for one request. A non-empty `api_key` wins over the configured one.
  pub fn session(&self, api_key: Option<String>) -> Result<Session<'_>, AppError> {
    let api_key = api_key
      .filter(|key| !key.trim().is_empty())
      .or_else(|| self.api_key.clone())
      .ok_or_else(|| {
        AppError::with_kind(
          ErrorKind::MissingApiKey,
          anyhow!(ErrorKind::MissingApiKey.message()),
        )
      })?;

    Ok(Session {
      client: self,
      api_key,
    })
  }
}

pub struct Session<'a> {
  client: &'a InferenceClient,
  api_key: String,
}

impl Session<'_> {
  fn endpoint(&self, model: &str) -> String {
    format!("{}/{}", self.client.base_url, model)
  }

  async fn send(&self, model: &str, request: RequestBuilder) -> Result<Response, AppError> {
    tracing::debug!(model, "inference request");

    let response = request
      .bearer_auth(&self.api_key)
      .send()
      .await
      .map_err(|err| AppError::with_kind(ErrorKind::ApiError, err))?;

    let status = response.status();
    tracing::debug!(model, status = status.as_u16(), "inference response");

    if status.is_success() {
      return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::upstream(status.as_u16(), upstream_message(&body)))
  }

  /// JSON in, JSON out.
  pub async fn post_json<B, T>(&self, model: &str, body: &B) -> Result<T, AppError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let request = self.client.http.post(self.endpoint(model)).json(body);
    let response = self.send(model, request).await?;
    decode(response).await
  }

  /// Raw media in, JSON out.
  pub async fn post_binary<T>(&self, model: &str, data: Bytes) -> Result<T, AppError>
  where
    T: DeserializeOwned,
  {
    let request = self
      .client
      .http
      .post(self.endpoint(model))
      .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
      .body(data);
    let response = self.send(model, request).await?;
    decode(response).await
  }

  /// JSON in, raw media out.
  pub async fn post_json_for_media<B>(
    &self,
    model: &str,
    body: &B,
    fallback_content_type: &str,
  ) -> Result<Media, AppError>
  where
    B: Serialize + ?Sized,
  {
    let request = self.client.http.post(self.endpoint(model)).json(body);
    let response = self.send(model, request).await?;

    let content_type = response
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .filter(|value| !value.starts_with("application/json"))
      .unwrap_or(fallback_content_type)
      .to_owned();

    let bytes = response
      .bytes()
      .await
      .map_err(|err| AppError::with_kind(ErrorKind::ApiError, err))?;

    Ok(Media {
      content_type,
      bytes,
    })
  }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
  let bytes = response
    .bytes()
    .await
    .map_err(|err| AppError::with_kind(ErrorKind::ApiError, err))?;

  serde_json::from_slice(&bytes).map_err(|err| {
    AppError::with_kind(
      ErrorKind::ApiError,
      anyhow::Error::new(err).context("unexpected response from inference service"),
    )
  })
}

#[derive(Deserialize)]
struct ErrorResponse {
  error: ErrorMessage,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
  One(String),
  Many(Vec<String>),
}

/// Pull the human-readable text out of an error body.
fn upstream_message(body: &str) -> String {
  match serde_json::from_str::<ErrorResponse>(body) {
    Ok(ErrorResponse {
      error: ErrorMessage::One(message),
    }) => message,
    Ok(ErrorResponse {
      error: ErrorMessage::Many(messages),
    }) => messages.join("; "),
    Err(_) if body.trim().is_empty() => "empty response body".to_owned(),
    Err(_) => body.trim().to_owned(),
  }
}

/// Tasks answer either with a single object or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
  Many(Vec<T>),
  One(T),
}

impl<T> OneOrMany<T> {
  pub(crate) fn into_vec(self) -> Vec<T> {
    match self {
      Self::Many(items) => items,
      Self::One(item) => vec![item],
    }
  }

  pub(crate) fn into_first(self, what: &str) -> Result<T, AppError> {
    self
      .into_vec()
      .into_iter()
      .next()
      .ok_or_else(|| AppError::with_kind(ErrorKind::ApiError, anyhow!("empty {what}")))
  }
}
