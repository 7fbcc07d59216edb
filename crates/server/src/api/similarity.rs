use axum::{Json, extract::State};
use hfplay_shared::{AppError, ErrorBody, cosine_similarity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::{ApiJson, AppState, required};

#[derive(Serialize, ToSchema)]
pub struct SimilarityOutput {
  /// Raw signed cosine, 0 when either side has zero magnitude
  pub similarity: f32,
}

#[derive(Deserialize, ToSchema)]
pub struct SentenceSimilarityInput {
  pub sentence1: String,
  pub sentence2: String,
  #[serde(rename = "apiKey")]
  pub api_key: Option<String>,
}

/// Cosine similarity of two sentence embeddings
#[utoipa::path(
  post,
  path = "/api/text/sentence-similarity",
  request_body = SentenceSimilarityInput,
  responses(
    (status = 200, description = "Similarity score", body = SimilarityOutput),
    (status = 400, description = "A sentence is empty", body = ErrorBody),
    (status = 422, description = "Embeddings differ in length", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn sentence_similarity(
  State(state): State<AppState>,
  ApiJson(payload): ApiJson<SentenceSimilarityInput>,
) -> Result<Json<SimilarityOutput>, AppError> {
  let sentence1 = required(&payload.sentence1, "sentence1")?;
  let sentence2 = required(&payload.sentence2, "sentence2")?;
  let session = state.client.session(payload.api_key)?;

  let similarity = hfplay_ai::sentence_similarity(&session, sentence1, sentence2).await?;
  Ok(Json(SimilarityOutput { similarity }))
}

#[derive(Deserialize, ToSchema)]
pub struct VectorSimilarityInput {
  pub a: Vec<f32>,
  pub b: Vec<f32>,
}

/// Cosine similarity of two caller-supplied vectors, computed locally
#[utoipa::path(
  post,
  path = "/api/vectors/similarity",
  request_body = VectorSimilarityInput,
  responses(
    (status = 200, description = "Similarity score", body = SimilarityOutput),
    (status = 422, description = "Vectors differ in length or hold non-finite values", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn vector_similarity(
  ApiJson(payload): ApiJson<VectorSimilarityInput>,
) -> Result<Json<SimilarityOutput>, AppError> {
  let similarity = cosine_similarity(&payload.a, &payload.b).map_err(AppError::invalid_input)?;
  Ok(Json(SimilarityOutput { similarity }))
}
