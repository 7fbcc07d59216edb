use axum::{
  Json,
  extract::State,
  http::header::CONTENT_TYPE,
  response::{IntoResponse, Response},
};
use hfplay_ai::{
  Classification, ImageToTextTask, Media,
  models::{DEFAULT_TEXT_TO_IMAGE_MODEL, DEFAULT_TEXT_TO_SPEECH_MODEL},
};
use hfplay_shared::{AppError, ErrorBody};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::{ApiJson, AppState, Form, required};

fn media_response(media: Media) -> Response {
  ([(CONTENT_TYPE, media.content_type)], media.bytes).into_response()
}

fn model_or<'a>(model: Option<&'a str>, default: &'a str) -> &'a str {
  model
    .map(str::trim)
    .filter(|model| !model.is_empty())
    .unwrap_or(default)
}

// --- Multipart schemas (documentation only) ---

#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct ImageUpload {
  #[schema(value_type = String, format = Binary)]
  image: Vec<u8>,
  #[serde(rename = "apiKey")]
  api_key: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct AudioUpload {
  #[schema(value_type = String, format = Binary)]
  audio: Vec<u8>,
  #[serde(rename = "apiKey")]
  api_key: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct ImageToTextUpload {
  #[schema(value_type = String, format = Binary)]
  image: Vec<u8>,
  task: ImageToTextTask,
  /// Required for the question answering tasks
  question: Option<String>,
  #[serde(rename = "apiKey")]
  api_key: Option<String>,
}

// --- Image ---

/// Label the contents of an image
#[utoipa::path(
  post,
  path = "/api/image/classification",
  request_body(content = ImageUpload, content_type = "multipart/form-data"),
  responses(
    (status = 200, description = "Labels with scores", body = Vec<Classification>),
    (status = 400, description = "No image provided", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn image_classification(
  State(state): State<AppState>,
  mut form: Form,
) -> Result<Json<Vec<Classification>>, AppError> {
  let image = form
    .file("image")
    .ok_or_else(|| AppError::bad_request("No image provided"))?;
  let session = state.client.session(form.text("apiKey")?)?;
  Ok(Json(hfplay_ai::image_classification(&session, image).await?))
}

#[derive(Deserialize, ToSchema)]
pub struct TextToImageInput {
  pub prompt: String,
  /// Diffusion model id
  pub model: Option<String>,
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

/// Generate an image from a prompt
#[utoipa::path(
  post,
  path = "/api/image/text-to-image",
  request_body = TextToImageInput,
  responses(
    (status = 200, description = "Generated image bytes, `image/png` unless the model says otherwise"),
    (status = 400, description = "Empty prompt or unavailable model", body = ErrorBody),
    (status = 503, description = "Model is loading", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn text_to_image(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<TextToImageInput>,
) -> Result<Response, AppError> {
  let prompt = required(&payload.prompt, "prompt")?;
  let model = model_or(payload.model.as_deref(), DEFAULT_TEXT_TO_IMAGE_MODEL);
  let session = state.client.session(payload.api_key)?;

  let media = hfplay_ai::text_to_image(&session, model, prompt).await?;
  Ok(media_response(media))
}

// --- Audio ---

/// Recognise the emotion in a speech clip
#[utoipa::path(
  post,
  path = "/api/audio/classification",
  request_body(content = AudioUpload, content_type = "multipart/form-data"),
  responses(
    (status = 200, description = "Labels with scores", body = Vec<Classification>),
    (status = 400, description = "No audio provided", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn audio_classification(
  State(state): State<AppState>,
  mut form: Form,
) -> Result<Json<Vec<Classification>>, AppError> {
  let audio = form
    .file("audio")
    .ok_or_else(|| AppError::bad_request("No audio provided"))?;
  let session = state.client.session(form.text("apiKey")?)?;
  Ok(Json(hfplay_ai::audio_classification(&session, audio).await?))
}

#[derive(Deserialize, ToSchema)]
pub struct TextToSpeechInput {
  pub text: String,
  /// Voice model id
  pub model: Option<String>,
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

/// Synthesise speech
#[utoipa::path(
  post,
  path = "/api/audio/text-to-speech",
  request_body = TextToSpeechInput,
  responses(
    (status = 200, description = "Audio bytes, `audio/wav` unless the model says otherwise"),
    (status = 400, description = "Text cannot be empty", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn text_to_speech(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<TextToSpeechInput>,
) -> Result<Response, AppError> {
  let text = required(&payload.text, "text")?;
  let model = model_or(payload.model.as_deref(), DEFAULT_TEXT_TO_SPEECH_MODEL);
  let session = state.client.session(payload.api_key)?;

  let media = hfplay_ai::text_to_speech(&session, model, text).await?;
  Ok(media_response(media))
}

// --- Multimodal ---

#[derive(Serialize, ToSchema)]
pub struct ImageToTextOutput {
  pub text: String,
}

/// Caption an image or answer a question about it
#[utoipa::path(
  post,
  path = "/api/multimodal/image-to-text",
  request_body(content = ImageToTextUpload, content_type = "multipart/form-data"),
  responses(
    (status = 200, description = "Caption or answer", body = ImageToTextOutput),
    (status = 400, description = "No image provided, invalid task or missing question", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn image_to_text(
  State(state): State<AppState>,
  mut form: Form,
) -> Result<Json<ImageToTextOutput>, AppError> {
  let image = form
    .file("image")
    .ok_or_else(|| AppError::bad_request("No image provided"))?;
  let task: ImageToTextTask = form
    .text("task")?
    .and_then(|task| task.trim().parse().ok())
    .ok_or_else(|| AppError::bad_request("Invalid task"))?;
  let question = form.text("question")?;
  let session = state.client.session(form.text("apiKey")?)?;

  let text = hfplay_ai::image_to_text(&session, task, image, question.as_deref()).await?;
  Ok(Json(ImageToTextOutput { text }))
}
