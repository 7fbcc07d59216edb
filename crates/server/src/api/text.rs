use axum::{Json, extract::State};
use hfplay_ai::{
  Answer, Classification, FeatureExtraction, TargetLanguage, TokenEntity, TokenTask,
  ZeroShotClassification, models::DEFAULT_TEXT_GENERATION_MODEL,
};
use hfplay_shared::{AppError, ErrorBody};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::{ApiJson, AppState, required};

// --- Classification ---

#[derive(Deserialize, ToSchema)]
pub struct TextInput {
  pub text: String,
  /// Hugging Face token; falls back to the server's key
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

/// Sentiment analysis
#[utoipa::path(
  post,
  path = "/api/text/classification",
  request_body = TextInput,
  responses(
    (status = 200, description = "Labels with scores", body = Vec<Classification>),
    (status = 400, description = "Text cannot be empty", body = ErrorBody),
    (status = 401, description = "Missing or invalid API key", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn classification(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<TextInput>,
) -> Result<Json<Vec<Classification>>, AppError> {
  let text = required(&payload.text, "text")?;
  let session = state.client.session(payload.api_key)?;
  Ok(Json(hfplay_ai::text_classification(&session, text).await?))
}

// --- Zero-shot ---

#[derive(Deserialize, ToSchema)]
pub struct ZeroShotInput {
  pub text: String,
  /// Candidate labels, at least one
  pub labels: Vec<String>,
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

/// Classify text against arbitrary labels
#[utoipa::path(
  post,
  path = "/api/text/zero-shot",
  request_body = ZeroShotInput,
  responses(
    (status = 200, description = "Labels ranked by score", body = ZeroShotClassification),
    (status = 400, description = "Text or labels missing", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn zero_shot(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<ZeroShotInput>,
) -> Result<Json<ZeroShotClassification>, AppError> {
  let text = required(&payload.text, "text")?;
  let labels: Vec<String> = payload
    .labels
    .iter()
    .map(|label| label.trim().to_owned())
    .filter(|label| !label.is_empty())
    .collect();
  if labels.is_empty() {
    return Err(AppError::bad_request("At least one label is required"));
  }

  let session = state.client.session(payload.api_key)?;
  Ok(Json(
    hfplay_ai::zero_shot_classification(&session, text, &labels).await?,
  ))
}

// --- Token classification ---

#[derive(Deserialize, ToSchema)]
pub struct TokenClassificationInput {
  pub text: String,
  /// `ner` (default) or `pos`
  #[serde(default)]
  pub task: TokenTask,
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

/// Named entity recognition or part-of-speech tagging
#[utoipa::path(
  post,
  path = "/api/text/token-classification",
  request_body = TokenClassificationInput,
  responses(
    (status = 200, description = "Tagged tokens", body = Vec<TokenEntity>),
    (status = 400, description = "Text cannot be empty", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn token_classification(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<TokenClassificationInput>,
) -> Result<Json<Vec<TokenEntity>>, AppError> {
  let text = required(&payload.text, "text")?;
  let session = state.client.session(payload.api_key)?;
  Ok(Json(
    hfplay_ai::token_classification(&session, text, payload.task).await?,
  ))
}

// --- Question answering ---

#[derive(Deserialize, ToSchema)]
pub struct QuestionAnsweringInput {
  pub context: String,
  pub question: String,
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

/// Extractive question answering
#[utoipa::path(
  post,
  path = "/api/text/question-answering",
  request_body = QuestionAnsweringInput,
  responses(
    (status = 200, description = "Answer span", body = Answer),
    (status = 400, description = "Context or question missing", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn question_answering(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<QuestionAnsweringInput>,
) -> Result<Json<Answer>, AppError> {
  let context = required(&payload.context, "context")?;
  let question = required(&payload.question, "question")?;
  let session = state.client.session(payload.api_key)?;
  Ok(Json(
    hfplay_ai::question_answering(&session, question, context).await?,
  ))
}

// --- Summarization ---

const fn default_summary_max() -> u32 {
  100
}

const fn default_summary_min() -> u32 {
  30
}

#[derive(Deserialize, ToSchema)]
pub struct SummarizationInput {
  pub text: String,
  #[serde(default = "default_summary_max")]
  pub max_length: u32,
  #[serde(default = "default_summary_min")]
  pub min_length: u32,
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SummarizationOutput {
  pub summary: String,
}

/// Abstractive summarization
#[utoipa::path(
  post,
  path = "/api/text/summarization",
  request_body = SummarizationInput,
  responses(
    (status = 200, description = "Summary", body = SummarizationOutput),
    (status = 400, description = "Empty text or min_length > max_length", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn summarization(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<SummarizationInput>,
) -> Result<Json<SummarizationOutput>, AppError> {
  let text = required(&payload.text, "text")?;
  if payload.min_length > payload.max_length {
    return Err(AppError::bad_request(
      "min_length cannot be greater than max_length",
    ));
  }

  let session = state.client.session(payload.api_key)?;
  let summary =
    hfplay_ai::summarization(&session, text, payload.max_length, payload.min_length).await?;
  Ok(Json(SummarizationOutput { summary }))
}

// --- Translation ---

#[derive(Deserialize, ToSchema)]
pub struct TranslationInput {
  pub text: String,
  /// Target language code; unknown codes translate to French
  pub target_language: Option<String>,
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct TranslationOutput {
  pub translation: String,
}

/// English to one of the catalog languages
#[utoipa::path(
  post,
  path = "/api/text/translation",
  request_body = TranslationInput,
  responses(
    (status = 200, description = "Translated text", body = TranslationOutput),
    (status = 400, description = "Text cannot be empty", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn translation(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<TranslationInput>,
) -> Result<Json<TranslationOutput>, AppError> {
  let text = required(&payload.text, "text")?;
  let target = payload
    .target_language
    .as_deref()
    .map(TargetLanguage::parse_or_default)
    .unwrap_or_default();

  let session = state.client.session(payload.api_key)?;
  let translation = hfplay_ai::translation(&session, text, target).await?;
  Ok(Json(TranslationOutput { translation }))
}

// --- Text generation ---

const fn default_max_length() -> u32 {
  100
}

const fn default_temperature() -> f32 {
  0.7
}

#[derive(Deserialize, ToSchema)]
pub struct GenerationInput {
  pub prompt: String,
  /// Maximum number of new tokens
  #[serde(default = "default_max_length")]
  pub max_length: u32,
  /// Sampling temperature in 0..=2
  #[serde(default = "default_temperature")]
  pub temperature: f32,
  /// Model id, defaults to `gpt2`
  pub model: Option<String>,
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct GenerationOutput {
  pub generated_text: String,
}

/// Continue a prompt
#[utoipa::path(
  post,
  path = "/api/text/generation",
  request_body = GenerationInput,
  responses(
    (status = 200, description = "Generated continuation", body = GenerationOutput),
    (status = 400, description = "Empty prompt or temperature out of range", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn generation(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<GenerationInput>,
) -> Result<Json<GenerationOutput>, AppError> {
  let prompt = required(&payload.prompt, "prompt")?;
  if !(0.0..=2.0).contains(&payload.temperature) {
    return Err(AppError::bad_request("temperature must be between 0 and 2"));
  }
  let model = payload
    .model
    .as_deref()
    .map(str::trim)
    .filter(|model| !model.is_empty())
    .unwrap_or(DEFAULT_TEXT_GENERATION_MODEL);

  let session = state.client.session(payload.api_key)?;
  let generated_text = hfplay_ai::text_generation(
    &session,
    model,
    prompt,
    payload.max_length,
    payload.temperature,
  )
  .await?;
  Ok(Json(GenerationOutput { generated_text }))
}

// --- Feature extraction ---

/// Sentence embedding, passed through as returned by the model
#[utoipa::path(
  post,
  path = "/api/text/feature-extraction",
  request_body = TextInput,
  responses(
    (status = 200, description = "Embedding vector (or one vector per token)", body = Vec<f32>),
    (status = 400, description = "Text cannot be empty", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn feature_extraction(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<TextInput>,
) -> Result<Json<FeatureExtraction>, AppError> {
  let text = required(&payload.text, "text")?;
  let session = state.client.session(payload.api_key)?;
  Ok(Json(hfplay_ai::feature_extraction(&session, text).await?))
}
