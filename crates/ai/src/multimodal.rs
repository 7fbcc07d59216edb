use anyhow::anyhow;
use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::Bytes;
use hfplay_shared::{AppError, ErrorKind};
use serde::{Deserialize, Serialize};

use crate::{
  client::{OneOrMany, Payload, Session},
  models::ImageToTextTask,
  text::GeneratedText,
};

#[derive(Debug, Serialize)]
struct ImageQuestion<'a> {
  image: String,
  question: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageAnswer {
  answer: String,
  #[serde(default)]
  score: f32,
}

/// Describe an image, or answer a question about it.
///
/// The two question answering tasks require a non-empty `question`.
pub async fn image_to_text(
  session: &Session<'_>,
  task: ImageToTextTask,
  image: Bytes,
  question: Option<&str>,
) -> Result<String, AppError> {
  if !task.needs_question() {
    let output: OneOrMany<GeneratedText> = session.post_binary(task.model(), image).await?;
    return Ok(output.into_first("caption")?.generated_text);
  }

  let question = question
    .map(str::trim)
    .filter(|q| !q.is_empty())
    .ok_or_else(|| AppError::bad_request("A question is required for this task"))?;

  let payload = Payload::new(ImageQuestion {
    image: STANDARD.encode(&image),
    question,
  });
  let output: OneOrMany<ImageAnswer> = session.post_json(task.model(), &payload).await?;

  output
    .into_vec()
    .into_iter()
    .max_by(|a, b| a.score.total_cmp(&b.score))
    .map(|best| best.answer)
    .ok_or_else(|| AppError::with_kind(ErrorKind::ApiError, anyhow!("empty answer")))
}
