use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};
use utoipa::ToSchema;

pub const TEXT_CLASSIFICATION_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment";
pub const ZERO_SHOT_MODEL: &str = "facebook/bart-large-mnli";
pub const NER_MODEL: &str = "dbmdz/bert-large-cased-finetuned-conll03-english";
pub const POS_MODEL: &str = "vblagoje/bert-english-uncased-finetuned-pos";
pub const QUESTION_ANSWERING_MODEL: &str = "deepset/roberta-base-squad2";
pub const SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";
pub const FEATURE_EXTRACTION_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const IMAGE_CLASSIFICATION_MODEL: &str = "google/vit-base-patch16-224";
pub const AUDIO_CLASSIFICATION_MODEL: &str = "superb/hubert-large-superb-er";
pub const IMAGE_CAPTIONING_MODEL: &str = "Salesforce/blip-image-captioning-base";
pub const VISUAL_QA_MODEL: &str = "dandelin/vilt-b32-finetuned-vqa";
pub const DOCUMENT_QA_MODEL: &str = "impira/layoutlm-document-qa";

pub const TEXT_GENERATION_MODELS: &[(&str, &str)] = &[
  ("gpt2", "GPT-2"),
  ("distilgpt2", "DistilGPT-2"),
  ("EleutherAI/gpt-neo-125M", "GPT-Neo (125M)"),
];

pub const TEXT_TO_IMAGE_MODELS: &[(&str, &str)] = &[
  ("runwayml/stable-diffusion-v1-5", "Stable Diffusion v1.5"),
  ("CompVis/stable-diffusion-v1-4", "Stable Diffusion v1.4"),
  ("stabilityai/stable-diffusion-2-1", "Stable Diffusion 2.1"),
  ("stabilityai/stable-diffusion-2", "Stable Diffusion 2.0"),
];

pub const TEXT_TO_SPEECH_MODELS: &[(&str, &str)] = &[
  ("facebook/mms-tts-eng", "MMS TTS (English)"),
  ("espnet/kan-bayashi_ljspeech_vits", "VITS (LJSpeech)"),
  ("microsoft/speecht5_tts", "SpeechT5"),
];

// First entry of each list is the default.
pub const DEFAULT_TEXT_GENERATION_MODEL: &str = TEXT_GENERATION_MODELS[0].0;
pub const DEFAULT_TEXT_TO_IMAGE_MODEL: &str = TEXT_TO_IMAGE_MODELS[0].0;
pub const DEFAULT_TEXT_TO_SPEECH_MODEL: &str = TEXT_TO_SPEECH_MODELS[0].0;

/// Translation target; the source language is always English.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  AsRefStr,
  EnumIter,
  EnumString,
  Serialize,
  Deserialize,
  ToSchema,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
  #[default]
  Fr,
  Es,
  De,
  It,
  Pt,
  Ru,
  Zh,
  Ja,
  Ar,
  Hi,
}

impl TargetLanguage {
  /// Unknown codes translate to French.
  #[must_use]
  pub fn parse_or_default(code: &str) -> Self {
    code.trim().parse().unwrap_or_else(|_| {
      tracing::debug!(code, "unsupported target language, falling back to French");
      Self::default()
    })
  }

  #[must_use]
  pub const fn model(self) -> &'static str {
    match self {
      Self::Fr => "Helsinki-NLP/opus-mt-en-fr",
      Self::Es => "Helsinki-NLP/opus-mt-en-es",
      Self::De => "Helsinki-NLP/opus-mt-en-de",
      Self::It => "Helsinki-NLP/opus-mt-en-it",
      Self::Pt => "Helsinki-NLP/opus-mt-en-pt",
      Self::Ru => "Helsinki-NLP/opus-mt-en-ru",
      Self::Zh => "Helsinki-NLP/opus-mt-en-zh",
      Self::Ja => "Helsinki-NLP/opus-mt-en-jap",
      Self::Ar => "Helsinki-NLP/opus-mt-en-ar",
      Self::Hi => "Helsinki-NLP/opus-mt-en-hi",
    }
  }

  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Fr => "French",
      Self::Es => "Spanish",
      Self::De => "German",
      Self::It => "Italian",
      Self::Pt => "Portuguese",
      Self::Ru => "Russian",
      Self::Zh => "Chinese",
      Self::Ja => "Japanese",
      Self::Ar => "Arabic",
      Self::Hi => "Hindi",
    }
  }

  pub fn all() -> impl Iterator<Item = Self> {
    Self::iter()
  }
}

/// Token classification flavour. Anything other than `ner` is part-of-speech tagging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenTask {
  #[default]
  Ner,
  #[serde(other)]
  Pos,
}

impl TokenTask {
  #[must_use]
  pub const fn model(self) -> &'static str {
    match self {
      Self::Ner => NER_MODEL,
      Self::Pos => POS_MODEL,
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter, EnumString, Serialize, Deserialize, ToSchema,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ImageToTextTask {
  ImageCaptioning,
  VisualQuestionAnswering,
  DocumentQuestionAnswering,
}

impl ImageToTextTask {
  #[must_use]
  pub const fn model(self) -> &'static str {
    match self {
      Self::ImageCaptioning => IMAGE_CAPTIONING_MODEL,
      Self::VisualQuestionAnswering => VISUAL_QA_MODEL,
      Self::DocumentQuestionAnswering => DOCUMENT_QA_MODEL,
    }
  }

  #[must_use]
  pub const fn needs_question(self) -> bool {
    !matches!(self, Self::ImageCaptioning)
  }
}
