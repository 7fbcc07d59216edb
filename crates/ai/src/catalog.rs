use serde::Serialize;
use strum::Display;
use utoipa::ToSchema;

use crate::models::{
  AUDIO_CLASSIFICATION_MODEL, DEFAULT_TEXT_GENERATION_MODEL, DEFAULT_TEXT_TO_IMAGE_MODEL,
  DEFAULT_TEXT_TO_SPEECH_MODEL, FEATURE_EXTRACTION_MODEL, IMAGE_CLASSIFICATION_MODEL,
  ImageToTextTask, NER_MODEL, POS_MODEL, QUESTION_ANSWERING_MODEL, SUMMARIZATION_MODEL,
  TEXT_CLASSIFICATION_MODEL, TEXT_GENERATION_MODELS, TEXT_TO_IMAGE_MODELS, TEXT_TO_SPEECH_MODELS,
  TargetLanguage, ZERO_SHOT_MODEL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Modality {
  Text,
  Image,
  Audio,
  Multimodal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelOption {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogTask {
  pub id: String,
  pub name: String,
  pub modality: Modality,
  /// Route serving the task
  pub path: String,
  pub default_model: String,
  /// Models the caller may pick from; empty when the model is fixed
  pub models: Vec<ModelOption>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LanguageOption {
  pub code: String,
  pub name: String,
  pub model: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Catalog {
  pub tasks: Vec<CatalogTask>,
  pub languages: Vec<LanguageOption>,
}

fn options(models: &[(&str, &str)]) -> Vec<ModelOption> {
  models
    .iter()
    .map(|(id, name)| ModelOption {
      id: (*id).to_owned(),
      name: (*name).to_owned(),
    })
    .collect()
}

fn task(
  id: &str,
  name: &str,
  modality: Modality,
  path: &str,
  default_model: &str,
  models: Vec<ModelOption>,
) -> CatalogTask {
  CatalogTask {
    id: id.to_owned(),
    name: name.to_owned(),
    modality,
    path: path.to_owned(),
    default_model: default_model.to_owned(),
    models,
  }
}

/// Every task the server proxies, grouped by modality in display order.
#[must_use]
pub fn catalog() -> Catalog {
  let image_to_text_models = options(&[
    (ImageToTextTask::ImageCaptioning.model(), "Image captioning"),
    (ImageToTextTask::VisualQuestionAnswering.model(), "Visual question answering"),
    (ImageToTextTask::DocumentQuestionAnswering.model(), "Document question answering"),
  ]);

  let tasks = vec![
    task(
      "text-classification",
      "Classification",
      Modality::Text,
      "/api/text/classification",
      TEXT_CLASSIFICATION_MODEL,
      Vec::new(),
    ),
    task(
      "zero-shot-classification",
      "Zero-Shot",
      Modality::Text,
      "/api/text/zero-shot",
      ZERO_SHOT_MODEL,
      Vec::new(),
    ),
    task(
      "token-classification",
      "Token",
      Modality::Text,
      "/api/text/token-classification",
      NER_MODEL,
      options(&[
        (NER_MODEL, "Named Entity Recognition"),
        (POS_MODEL, "Part-of-Speech Tagging"),
      ]),
    ),
    task(
      "question-answering",
      "Q&A",
      Modality::Text,
      "/api/text/question-answering",
      QUESTION_ANSWERING_MODEL,
      Vec::new(),
    ),
    task(
      "summarization",
      "Summarization",
      Modality::Text,
      "/api/text/summarization",
      SUMMARIZATION_MODEL,
      Vec::new(),
    ),
    task(
      "translation",
      "Translation",
      Modality::Text,
      "/api/text/translation",
      TargetLanguage::default().model(),
      Vec::new(),
    ),
    task(
      "text-generation",
      "Text-to-Text",
      Modality::Text,
      "/api/text/generation",
      DEFAULT_TEXT_GENERATION_MODEL,
      options(TEXT_GENERATION_MODELS),
    ),
    task(
      "feature-extraction",
      "Feature Extraction",
      Modality::Text,
      "/api/text/feature-extraction",
      FEATURE_EXTRACTION_MODEL,
      Vec::new(),
    ),
    task(
      "sentence-similarity",
      "Sentence Similarity",
      Modality::Text,
      "/api/text/sentence-similarity",
      FEATURE_EXTRACTION_MODEL,
      Vec::new(),
    ),
    task(
      "image-classification",
      "Image Classification",
      Modality::Image,
      "/api/image/classification",
      IMAGE_CLASSIFICATION_MODEL,
      Vec::new(),
    ),
    task(
      "text-to-image",
      "Text-to-Image",
      Modality::Image,
      "/api/image/text-to-image",
      DEFAULT_TEXT_TO_IMAGE_MODEL,
      options(TEXT_TO_IMAGE_MODELS),
    ),
    task(
      "audio-classification",
      "Audio Classification",
      Modality::Audio,
      "/api/audio/classification",
      AUDIO_CLASSIFICATION_MODEL,
      Vec::new(),
    ),
    task(
      "text-to-speech",
      "Text-to-Speech",
      Modality::Audio,
      "/api/audio/text-to-speech",
      DEFAULT_TEXT_TO_SPEECH_MODEL,
      options(TEXT_TO_SPEECH_MODELS),
    ),
    task(
      "image-to-text",
      "Image-to-Text",
      Modality::Multimodal,
      "/api/multimodal/image-to-text",
      ImageToTextTask::ImageCaptioning.model(),
      image_to_text_models,
    ),
  ];

  let languages = TargetLanguage::all()
    .map(|lang| LanguageOption {
      code: lang.as_ref().to_owned(),
      name: lang.name().to_owned(),
      model: lang.model().to_owned(),
    })
    .collect();

  Catalog { tasks, languages }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn task_ids_and_paths_are_unique() {
    let catalog = catalog();
    let ids: HashSet<_> = catalog.tasks.iter().map(|t| t.id.as_str()).collect();
    let paths: HashSet<_> = catalog.tasks.iter().map(|t| t.path.as_str()).collect();
    assert_eq!(ids.len(), catalog.tasks.len());
    assert_eq!(paths.len(), catalog.tasks.len());
  }

  #[test]
  fn selectable_defaults_are_listed() {
    for task in catalog().tasks.iter().filter(|t| !t.models.is_empty()) {
      assert!(
        task.models.iter().any(|m| m.id == task.default_model),
        "{} default is not selectable",
        task.id
      );
    }
  }

  #[test]
  fn every_modality_is_covered() {
    let catalog = catalog();
    for modality in [Modality::Text, Modality::Image, Modality::Audio, Modality::Multimodal] {
      assert!(catalog.tasks.iter().any(|t| t.modality == modality), "{modality}");
    }
    assert_eq!(catalog.languages[0].code, "fr");
  }
}
