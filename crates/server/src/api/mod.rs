use axum::{
  Json, Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::utils::AppState;

mod catalog;
mod media;
mod similarity;
mod text;

pub use media::{
  AudioUpload, ImageToTextOutput, ImageToTextUpload, ImageUpload, TextToImageInput,
  TextToSpeechInput,
};
pub use similarity::{SentenceSimilarityInput, SimilarityOutput, VectorSimilarityInput};
pub use text::{
  GenerationInput, GenerationOutput, QuestionAnsweringInput, SummarizationInput,
  SummarizationOutput, TextInput, TokenClassificationInput, TranslationInput, TranslationOutput,
  ZeroShotInput,
};

/// Uploaded images and audio clips are buffered in memory.
const UPLOAD_LIMIT: usize = 20 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
  info(
    title = "hfplay API",
    version = "0.0.1",
    description = "Playground for Hugging Face Inference API tasks"
  ),
  paths(
    catalog::catalog,
    text::classification,
    text::zero_shot,
    text::token_classification,
    text::question_answering,
    text::summarization,
    text::translation,
    text::generation,
    text::feature_extraction,
    similarity::sentence_similarity,
    similarity::vector_similarity,
    media::image_classification,
    media::text_to_image,
    media::audio_classification,
    media::text_to_speech,
    media::image_to_text
  ),
  components(schemas(
    TextInput,
    ZeroShotInput,
    TokenClassificationInput,
    QuestionAnsweringInput,
    SummarizationInput,
    SummarizationOutput,
    TranslationInput,
    TranslationOutput,
    GenerationInput,
    GenerationOutput,
    SentenceSimilarityInput,
    VectorSimilarityInput,
    SimilarityOutput,
    ImageUpload,
    AudioUpload,
    ImageToTextUpload,
    ImageToTextOutput,
    TextToImageInput,
    TextToSpeechInput,
    hfplay_ai::Classification,
    hfplay_ai::ZeroShotClassification,
    hfplay_ai::TokenEntity,
    hfplay_ai::Answer,
    hfplay_ai::TokenTask,
    hfplay_ai::ImageToTextTask,
    hfplay_ai::catalog::Catalog,
    hfplay_ai::catalog::CatalogTask,
    hfplay_ai::catalog::LanguageOption,
    hfplay_ai::catalog::ModelOption,
    hfplay_ai::catalog::Modality,
    hfplay_shared::ErrorBody,
    hfplay_shared::ErrorKind,
  ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
  Json(ApiDoc::openapi())
}

pub fn app() -> Router<AppState> {
  let text = Router::new()
    .route("/classification", post(text::classification))
    .route("/zero-shot", post(text::zero_shot))
    .route("/token-classification", post(text::token_classification))
    .route("/question-answering", post(text::question_answering))
    .route("/summarization", post(text::summarization))
    .route("/translation", post(text::translation))
    .route("/generation", post(text::generation))
    .route("/feature-extraction", post(text::feature_extraction))
    .route("/sentence-similarity", post(similarity::sentence_similarity));

  let uploads = Router::new()
    .route("/api/image/classification", post(media::image_classification))
    .route("/api/audio/classification", post(media::audio_classification))
    .route("/api/multimodal/image-to-text", post(media::image_to_text))
    .layer(DefaultBodyLimit::max(UPLOAD_LIMIT));

  Router::new()
    .route("/api/catalog", get(catalog::catalog))
    .nest("/api/text", text)
    .route("/api/vectors/similarity", post(similarity::vector_similarity))
    .route("/api/image/text-to-image", post(media::text_to_image))
    .route("/api/audio/text-to-speech", post(media::text_to_speech))
    .merge(uploads)
    .route("/openapi.json", get(openapi_json))
    .merge(Scalar::with_url("/openapi/", ApiDoc::openapi()))
}
