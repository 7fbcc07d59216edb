use anyhow::anyhow;
use hfplay_shared::{AppError, ErrorKind, cosine_similarity};
use serde::{Deserialize, Serialize};

use crate::{
  client::{Payload, Session},
  models::FEATURE_EXTRACTION_MODEL,
};

/// Output of the feature extraction pipeline.
///
/// Sentence-transformers models return one pooled vector, plain encoders
/// return one vector per token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureExtraction {
  Vector(Vec<f32>),
  Matrix(Vec<Vec<f32>>),
}

impl FeatureExtraction {
  /// Collapse to a single sentence vector, mean pooling token rows.
  ///
  /// Token rows of differing widths are reported as an `api_error`.
  pub fn into_sentence_vector(self) -> Result<Vec<f32>, AppError> {
    let rows = match self {
      Self::Vector(vector) => return Ok(vector),
      Self::Matrix(mut rows) if rows.len() == 1 => return Ok(rows.remove(0)),
      Self::Matrix(rows) => rows,
    };
    let Some(width) = rows.first().map(Vec::len) else {
      return Ok(Vec::new());
    };

    let mut pooled = vec![0.0_f32; width];
    for (index, row) in rows.iter().enumerate() {
      if row.len() != width {
        return Err(AppError::with_kind(
          ErrorKind::ApiError,
          anyhow!("inconsistent embedding width"),
        )
        .with_details(format!(
          "token row {index} has {} values, expected {width}",
          row.len()
        )));
      }
      for (acc, &x) in pooled.iter_mut().zip(row) {
        *acc += x;
      }
    }

    #[allow(clippy::cast_precision_loss)]
    let count = rows.len() as f32;
    for x in &mut pooled {
      *x /= count;
    }
    Ok(pooled)
  }
}

pub async fn feature_extraction(
  session: &Session<'_>,
  text: &str,
) -> Result<FeatureExtraction, AppError> {
  session
    .post_json(FEATURE_EXTRACTION_MODEL, &Payload::new(text))
    .await
}

/// Embed both sentences and compare them.
pub async fn sentence_similarity(
  session: &Session<'_>,
  sentence1: &str,
  sentence2: &str,
) -> Result<f32, AppError> {
  let embedding1 = feature_extraction(session, sentence1)
    .await?
    .into_sentence_vector()?;
  let embedding2 = feature_extraction(session, sentence2)
    .await?
    .into_sentence_vector()?;

  cosine_similarity(&embedding1, &embedding2).map_err(AppError::invalid_input)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flat_vector_is_kept() {
    let output: FeatureExtraction = serde_json::from_str("[0.5, 0.25, 0.125]").unwrap();
    assert_eq!(output.into_sentence_vector().unwrap(), vec![0.5, 0.25, 0.125]);
  }

  #[test]
  fn token_matrix_is_mean_pooled() {
    let output: FeatureExtraction = serde_json::from_str("[[1.0, 2.0], [3.0, 6.0]]").unwrap();
    assert!(matches!(output, FeatureExtraction::Matrix(_)));
    assert_eq!(output.into_sentence_vector().unwrap(), vec![2.0, 4.0]);
  }

  #[test]
  fn single_row_matrix_is_unwrapped() {
    let output = FeatureExtraction::Matrix(vec![vec![0.5, 0.5]]);
    assert_eq!(output.into_sentence_vector().unwrap(), vec![0.5, 0.5]);
  }

  #[test]
  fn ragged_token_rows_are_rejected() {
    let output = FeatureExtraction::Matrix(vec![vec![1.0, 2.0, 3.0], vec![3.0]]);
    let err = output.into_sentence_vector().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ApiError);
    assert_eq!(err.body().message, "inconsistent embedding width");
    assert_eq!(err.details(), Some("token row 1 has 1 values, expected 3"));
  }

  #[test]
  fn serializes_back_to_the_same_shape() {
    let output = FeatureExtraction::Matrix(vec![vec![1.0], vec![2.0]]);
    assert_eq!(
      serde_json::to_value(&output).unwrap(),
      serde_json::json!([[1.0], [2.0]])
    );
  }
}
