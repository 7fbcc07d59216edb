use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityError {
  #[error("vectors must have the same length (got {left} and {right})")]
  LengthMismatch { left: usize, right: usize },
  #[error("vector components must be finite (index {index})")]
  NonFinite { index: usize },
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns the raw signed cosine in [-1.0, 1.0] where 1.0 means identical
/// direction. If either vector has zero magnitude the result is 0.0.
///
/// # Errors
///
/// Returns [`SimilarityError::LengthMismatch`] when the vectors differ in length,
/// and [`SimilarityError::NonFinite`] when a component is NaN or infinite.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
  if a.len() != b.len() {
    return Err(SimilarityError::LengthMismatch {
      left: a.len(),
      right: b.len(),
    });
  }
  if let Some(index) = a
    .iter()
    .zip(b)
    .position(|(x, y)| !x.is_finite() || !y.is_finite())
  {
    return Err(SimilarityError::NonFinite { index });
  }

  let mut dot = 0.0_f64;
  let mut norm_a = 0.0_f64;
  let mut norm_b = 0.0_f64;

  for (&x, &y) in a.iter().zip(b.iter()) {
    let x = f64::from(x);
    let y = f64::from(y);
    dot = x.mul_add(y, dot);
    norm_a = x.mul_add(x, norm_a);
    norm_b = y.mul_add(y, norm_b);
  }

  let norm_a = norm_a.sqrt();
  let norm_b = norm_b.sqrt();
  if norm_a == 0.0 || norm_b == 0.0 {
    return Ok(0.0);
  }

  #[allow(clippy::cast_possible_truncation)]
  Ok((dot / (norm_a * norm_b)) as f32)
}
