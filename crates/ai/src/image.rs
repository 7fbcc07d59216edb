use bytes::Bytes;
use hfplay_shared::AppError;
use serde::Serialize;

use crate::{
  Classification,
  classification::ClassificationOutput,
  client::{Media, Payload, Session},
  models::IMAGE_CLASSIFICATION_MODEL,
};

const NEGATIVE_PROMPT: &str = "blurry, bad quality, worst quality, low quality, low resolution, ugly, duplicate, morbid, mutilated, deformed";

pub async fn image_classification(
  session: &Session<'_>,
  image: Bytes,
) -> Result<Vec<Classification>, AppError> {
  let output: ClassificationOutput = session
    .post_binary(IMAGE_CLASSIFICATION_MODEL, image)
    .await?;
  Ok(output.into_flat())
}

#[derive(Debug, Serialize)]
struct TextToImageParameters {
  negative_prompt: &'static str,
}

/// Render `prompt` with a diffusion model. Defaults to PNG when the service omits a content type.
pub async fn text_to_image(
  session: &Session<'_>,
  model: &str,
  prompt: &str,
) -> Result<Media, AppError> {
  let payload = Payload::with_parameters(
    prompt,
    TextToImageParameters {
      negative_prompt: NEGATIVE_PROMPT,
    },
  );
  session
    .post_json_for_media(model, &payload, "image/png")
    .await
}
