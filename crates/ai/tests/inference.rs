//! Task wrappers against a mocked inference service.

use std::time::Duration;

use bytes::Bytes;
use hfplay_ai::{
  ImageToTextTask, InferenceClient, TargetLanguage, TokenTask, image_classification,
  image_to_text, sentence_similarity, text_classification, text_generation, text_to_speech,
  token_classification, translation, zero_shot_classification,
};
use hfplay_shared::ErrorKind;
use serde_json::json;
use wiremock::{
  Mock, MockServer, ResponseTemplate,
  matchers::{body_bytes, body_json, header, method, path},
};

async fn client(server: &MockServer) -> InferenceClient {
  InferenceClient::new(server.uri(), Some("hf_test".to_owned()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn text_classification_sends_bearer_and_flattens() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/cardiffnlp/twitter-roberta-base-sentiment"))
    .and(header("authorization", "Bearer hf_test"))
    .and(body_json(json!({ "inputs": "I love it" })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
      { "label": "LABEL_2", "score": 0.97 },
      { "label": "LABEL_1", "score": 0.02 },
    ]])))
    .expect(1)
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let labels = text_classification(&session, "I love it").await.unwrap();

  assert_eq!(labels.len(), 2);
  assert_eq!(labels[0].label, "LABEL_2");
}

#[tokio::test]
async fn request_key_overrides_configured_key() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(header("authorization", "Bearer hf_user"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "generated_text": " world" }])))
    .expect(1)
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(Some("hf_user".to_owned())).unwrap();
  let text = text_generation(&session, "gpt2", "hello", 10, 0.7).await.unwrap();

  assert_eq!(text, " world");
}

#[tokio::test]
async fn text_generation_sends_parameters() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/distilgpt2"))
    .and(body_json(json!({
      "inputs": "Once",
      "parameters": { "max_new_tokens": 20, "temperature": 0.5, "return_full_text": false }
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "generated_text": " upon" }])))
    .expect(1)
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let text = text_generation(&session, "distilgpt2", "Once", 20, 0.5).await.unwrap();

  assert_eq!(text, " upon");
}

#[tokio::test]
async fn zero_shot_pairs_are_normalized() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/facebook/bart-large-mnli"))
    .and(body_json(json!({
      "inputs": "new camera",
      "parameters": { "candidate_labels": ["tech", "food"] }
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([
      { "label": "tech", "score": 0.75 },
      { "label": "food", "score": 0.25 },
    ])))
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let labels = vec!["tech".to_owned(), "food".to_owned()];
  let result = zero_shot_classification(&session, "new camera", &labels).await.unwrap();

  assert_eq!(result.labels, labels);
  assert_eq!(result.scores, vec![0.75, 0.25]);
  assert_eq!(result.sequence, "new camera");
}

#[tokio::test]
async fn token_task_selects_model() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/vblagoje/bert-english-uncased-finetuned-pos"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([
      { "entity_group": "NOUN", "score": 0.9, "word": "cat", "start": 4, "end": 7 }
    ])))
    .expect(1)
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let entities = token_classification(&session, "the cat", TokenTask::Pos).await.unwrap();

  assert_eq!(entities[0].word, "cat");
  assert_eq!(entities[0].end, Some(7));
}

#[tokio::test]
async fn translation_uses_language_model() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/Helsinki-NLP/opus-mt-en-jap"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!([{ "translation_text": "こんにちは" }])),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let text = translation(&session, "hello", TargetLanguage::Ja).await.unwrap();

  assert_eq!(text, "こんにちは");
}

#[tokio::test]
async fn sentence_similarity_embeds_both_sentences() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/sentence-transformers/all-MiniLM-L6-v2"))
    .and(body_json(json!({ "inputs": "a" })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([1.0, 2.0, 3.0])))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/sentence-transformers/all-MiniLM-L6-v2"))
    .and(body_json(json!({ "inputs": "b" })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([4.0, 5.0, 6.0])))
    .expect(1)
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let similarity = sentence_similarity(&session, "a", "b").await.unwrap();

  assert!((similarity - 0.9746).abs() < 1e-4);
}

#[tokio::test]
async fn sentence_similarity_rejects_mismatched_embeddings() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(body_json(json!({ "inputs": "short" })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([1.0, 2.0])))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(body_json(json!({ "inputs": "long" })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([1.0, 2.0, 3.0])))
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let err = sentence_similarity(&session, "short", "long").await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn image_classification_posts_raw_bytes() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/google/vit-base-patch16-224"))
    .and(header("content-type", "application/octet-stream"))
    .and(body_bytes(b"\x89PNG".to_vec()))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!([{ "label": "tabby", "score": 0.8 }])),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let labels = image_classification(&session, Bytes::from_static(b"\x89PNG"))
    .await
    .unwrap();

  assert_eq!(labels[0].label, "tabby");
}

#[tokio::test]
async fn visual_question_answering_picks_best_answer() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/dandelin/vilt-b32-finetuned-vqa"))
    .and(body_json(json!({ "inputs": { "image": "aGk=", "question": "what?" } })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([
      { "answer": "dog", "score": 0.25 },
      { "answer": "cat", "score": 0.75 },
    ])))
    .expect(1)
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let answer = image_to_text(
    &session,
    ImageToTextTask::VisualQuestionAnswering,
    Bytes::from_static(b"hi"),
    Some("what?"),
  )
  .await
  .unwrap();

  assert_eq!(answer, "cat");
}

#[tokio::test]
async fn question_tasks_require_a_question() {
  let server = MockServer::start().await;
  let client = client(&server).await;
  let session = client.session(None).unwrap();

  let err = image_to_text(
    &session,
    ImageToTextTask::DocumentQuestionAnswering,
    Bytes::from_static(b"hi"),
    Some("   "),
  )
  .await
  .unwrap_err();

  assert_eq!(err.kind(), ErrorKind::RequestError);
  assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn text_to_speech_keeps_upstream_content_type() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/facebook/mms-tts-eng"))
    .respond_with(
      ResponseTemplate::new(200).set_body_raw(b"RIFF....WAVE".to_vec(), "audio/flac"),
    )
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let media = text_to_speech(&session, "facebook/mms-tts-eng", "hi").await.unwrap();

  assert_eq!(media.content_type, "audio/flac");
  assert_eq!(&media.bytes[..], b"RIFF....WAVE");
}

#[tokio::test]
async fn upstream_errors_are_classified() {
  let cases = [
    (401, json!({ "error": "Invalid token" }), ErrorKind::InvalidApiKey),
    (
      402,
      json!({ "error": "You have exceeded your monthly included credits" }),
      ErrorKind::QuotaExceeded,
    ),
    (404, json!({ "error": "Model not found" }), ErrorKind::ModelUnavailable),
    (
      503,
      json!({ "error": "Model is currently loading", "estimated_time": 20.0 }),
      ErrorKind::ModelLoading,
    ),
    (500, json!({ "error": ["boom"] }), ErrorKind::ApiError),
  ];

  for (status, body, kind) in cases {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(status).set_body_json(body))
      .mount(&server)
      .await;

    let client = client(&server).await;
    let session = client.session(None).unwrap();
    let err = text_classification(&session, "x").await.unwrap_err();

    assert_eq!(err.kind(), kind, "status {status}");
    assert!(err.details().unwrap().starts_with(&format!("[{status}]")));
  }
}

#[tokio::test]
async fn malformed_success_body_is_an_api_error() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
    .mount(&server)
    .await;

  let client = client(&server).await;
  let session = client.session(None).unwrap();
  let err = text_classification(&session, "x").await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::ApiError);
}
