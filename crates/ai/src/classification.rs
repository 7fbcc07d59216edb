use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Classification {
  pub label: String,
  pub score: f32,
}

/// Text pipelines wrap their labels in an extra list, media pipelines don't.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ClassificationOutput {
  Nested(Vec<Vec<Classification>>),
  Flat(Vec<Classification>),
  Single(Classification),
}

impl ClassificationOutput {
  pub(crate) fn into_flat(self) -> Vec<Classification> {
    match self {
      Self::Nested(batches) => batches.into_iter().flatten().collect(),
      Self::Flat(labels) => labels,
      Self::Single(label) => vec![label],
    }
  }
}
