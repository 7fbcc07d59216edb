mod client;
pub use client::{InferenceClient, Media, Payload, Session};

mod classification;
pub use classification::Classification;

pub mod catalog;
pub use catalog::catalog;

pub mod models;
pub use models::{ImageToTextTask, TargetLanguage, TokenTask};

mod text;
pub use text::{
  Answer, TokenEntity, ZeroShotClassification, question_answering, summarization,
  text_classification, text_generation, token_classification, translation,
  zero_shot_classification,
};

mod embedding;
pub use embedding::{FeatureExtraction, feature_extraction, sentence_similarity};

mod image;
pub use image::{image_classification, text_to_image};

mod audio;
pub use audio::{audio_classification, text_to_speech};

mod multimodal;
pub use multimodal::image_to_text;
