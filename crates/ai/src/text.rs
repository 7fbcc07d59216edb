use hfplay_shared::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
  Classification,
  classification::ClassificationOutput,
  client::{OneOrMany, Payload, Session},
  models::{
    QUESTION_ANSWERING_MODEL, SUMMARIZATION_MODEL, TEXT_CLASSIFICATION_MODEL, TargetLanguage,
    TokenTask, ZERO_SHOT_MODEL,
  },
};

/// Sentiment of `text`.
pub async fn text_classification(
  session: &Session<'_>,
  text: &str,
) -> Result<Vec<Classification>, AppError> {
  let output: ClassificationOutput = session
    .post_json(TEXT_CLASSIFICATION_MODEL, &Payload::new(text))
    .await?;
  Ok(output.into_flat())
}

// --- Zero-shot ---

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
  candidate_labels: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ZeroShotClassification {
  pub labels: Vec<String>,
  pub scores: Vec<f32>,
  pub sequence: String,
}

#[derive(Debug, Deserialize)]
struct ZeroShotColumns {
  #[serde(default)]
  sequence: Option<String>,
  labels: Vec<String>,
  scores: Vec<f32>,
}

/// The pipeline has answered both as parallel columns and as a list of pairs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotOutput {
  Columns(ZeroShotColumns),
  Pairs(Vec<Classification>),
  Batch(Vec<ZeroShotColumns>),
}

impl ZeroShotOutput {
  fn normalize(self, text: &str) -> ZeroShotClassification {
    let columns = match self {
      Self::Columns(columns) => Some(columns),
      Self::Batch(batch) => batch.into_iter().next(),
      Self::Pairs(pairs) => {
        let (labels, scores) = pairs.into_iter().map(|c| (c.label, c.score)).unzip();
        Some(ZeroShotColumns {
          sequence: None,
          labels,
          scores,
        })
      }
    };

    match columns {
      Some(columns) => ZeroShotClassification {
        sequence: columns.sequence.unwrap_or_else(|| text.to_owned()),
        labels: columns.labels,
        scores: columns.scores,
      },
      None => ZeroShotClassification {
        labels: Vec::new(),
        scores: Vec::new(),
        sequence: text.to_owned(),
      },
    }
  }
}

/// Score `text` against caller-supplied labels.
pub async fn zero_shot_classification(
  session: &Session<'_>,
  text: &str,
  labels: &[String],
) -> Result<ZeroShotClassification, AppError> {
  let payload = Payload::with_parameters(
    text,
    ZeroShotParameters {
      candidate_labels: labels,
    },
  );
  let output: ZeroShotOutput = session.post_json(ZERO_SHOT_MODEL, &payload).await?;
  Ok(output.normalize(text))
}

// --- Token classification ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TokenEntity {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub entity_group: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub entity: Option<String>,
  pub score: f32,
  pub word: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start: Option<usize>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end: Option<usize>,
}

pub async fn token_classification(
  session: &Session<'_>,
  text: &str,
  task: TokenTask,
) -> Result<Vec<TokenEntity>, AppError> {
  session.post_json(task.model(), &Payload::new(text)).await
}

// --- Question answering ---

#[derive(Debug, Serialize)]
struct QuestionContext<'a> {
  question: &'a str,
  context: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Answer {
  pub answer: String,
  pub score: f32,
  pub start: usize,
  pub end: usize,
}

/// Extract the answer to `question` from `context`.
pub async fn question_answering(
  session: &Session<'_>,
  question: &str,
  context: &str,
) -> Result<Answer, AppError> {
  let output: OneOrMany<Answer> = session
    .post_json(
      QUESTION_ANSWERING_MODEL,
      &Payload::new(QuestionContext { question, context }),
    )
    .await?;
  output.into_first("answer")
}

// --- Summarization ---

#[derive(Debug, Serialize)]
struct SummarizationParameters {
  max_length: u32,
  min_length: u32,
}

#[derive(Debug, Deserialize)]
struct SummaryText {
  summary_text: String,
}

pub async fn summarization(
  session: &Session<'_>,
  text: &str,
  max_length: u32,
  min_length: u32,
) -> Result<String, AppError> {
  let payload = Payload::with_parameters(
    text,
    SummarizationParameters {
      max_length,
      min_length,
    },
  );
  let output: OneOrMany<SummaryText> = session.post_json(SUMMARIZATION_MODEL, &payload).await?;
  Ok(output.into_first("summary")?.summary_text)
}

// --- Translation ---

#[derive(Debug, Deserialize)]
struct TranslationText {
  translation_text: String,
}

/// Translate English `text` into `target`.
pub async fn translation(
  session: &Session<'_>,
  text: &str,
  target: TargetLanguage,
) -> Result<String, AppError> {
  let output: OneOrMany<TranslationText> =
    session.post_json(target.model(), &Payload::new(text)).await?;
  Ok(output.into_first("translation")?.translation_text)
}

// --- Text generation ---

#[derive(Debug, Serialize)]
struct GenerationParameters {
  max_new_tokens: u32,
  temperature: f32,
  return_full_text: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedText {
  pub(crate) generated_text: String,
}

/// Continue `prompt`; only the new text is returned.
pub async fn text_generation(
  session: &Session<'_>,
  model: &str,
  prompt: &str,
  max_new_tokens: u32,
  temperature: f32,
) -> Result<String, AppError> {
  let payload = Payload::with_parameters(
    prompt,
    GenerationParameters {
      max_new_tokens,
      temperature,
      return_full_text: false,
    },
  );
  let output: OneOrMany<GeneratedText> = session.post_json(model, &payload).await?;
  Ok(output.into_first("generated text")?.generated_text)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_shot_columns_keep_sequence() {
    let output: ZeroShotOutput = serde_json::from_str(
      r#"{"sequence":"hello","labels":["greeting","farewell"],"scores":[0.9,0.1]}"#,
    )
    .unwrap();
    let result = output.normalize("ignored");
    assert_eq!(result.sequence, "hello");
    assert_eq!(result.labels, vec!["greeting", "farewell"]);
  }

  #[test]
  fn zero_shot_pairs_become_columns() {
    let output: ZeroShotOutput =
      serde_json::from_str(r#"[{"label":"tech","score":0.75},{"label":"food","score":0.25}]"#)
        .unwrap();
    let result = output.normalize("my phone");
    assert_eq!(result.labels, vec!["tech", "food"]);
    assert_eq!(result.scores, vec![0.75, 0.25]);
    assert_eq!(result.sequence, "my phone");
  }

  #[test]
  fn zero_shot_batch_takes_first() {
    let output: ZeroShotOutput =
      serde_json::from_str(r#"[{"labels":["a"],"scores":[1.0]}]"#).unwrap();
    let result = output.normalize("text");
    assert_eq!(result.labels, vec!["a"]);
    assert_eq!(result.sequence, "text");
  }

  #[test]
  fn zero_shot_parameters_serialize_as_list() {
    let labels = vec!["a".to_owned(), "b".to_owned()];
    let payload = Payload::with_parameters(
      "x",
      ZeroShotParameters {
        candidate_labels: &labels,
      },
    );
    let json = serde_json::to_value(payload).unwrap();
    assert_eq!(
      json,
      serde_json::json!({ "inputs": "x", "parameters": { "candidate_labels": ["a", "b"] } })
    );
  }

  #[test]
  fn token_entities_accept_grouped_and_raw() {
    let grouped: Vec<TokenEntity> = serde_json::from_str(
      r#"[{"entity_group":"PER","score":0.99,"word":"Ada","start":0,"end":3}]"#,
    )
    .unwrap();
    let raw: Vec<TokenEntity> =
      serde_json::from_str(r#"[{"entity":"NOUN","score":0.5,"word":"cat"}]"#).unwrap();
    assert_eq!(grouped[0].entity_group.as_deref(), Some("PER"));
    assert_eq!(raw[0].entity.as_deref(), Some("NOUN"));
    assert_eq!(raw[0].start, None);
  }
}
