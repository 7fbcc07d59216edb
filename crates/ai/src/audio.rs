use bytes::Bytes;
use hfplay_shared::AppError;

use crate::{
  Classification,
  classification::ClassificationOutput,
  client::{Media, Payload, Session},
  models::AUDIO_CLASSIFICATION_MODEL,
};

/// Emotion labels for a speech clip.
pub async fn audio_classification(
  session: &Session<'_>,
  audio: Bytes,
) -> Result<Vec<Classification>, AppError> {
  let output: ClassificationOutput = session
    .post_binary(AUDIO_CLASSIFICATION_MODEL, audio)
    .await?;
  Ok(output.into_flat())
}

pub async fn text_to_speech(
  session: &Session<'_>,
  model: &str,
  text: &str,
) -> Result<Media, AppError> {
  session
    .post_json_for_media(model, &Payload::new(text), "audio/wav")
    .await
}
