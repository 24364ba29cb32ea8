// src/generator/gemini.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{GenerateError, QuizGenerator, decode_quiz};
use crate::{config::Config, models::quiz_item::GeneratedQuiz};

/// Fixed instruction sent to the model.
pub const QUIZ_PROMPT: &str = r#"プログラミングの関数命名問題を1つ生成してください。

以下のJSON形式で返してください：
{
  "title": "問題のタイトル",
  "description": "問題の説明文",
  "code": "function ???(引数) { コード }",
  "options": [
    {"value": "選択肢1の値", "text": "選択肢1の表示名"},
    {"value": "選択肢2の値", "text": "選択肢2の表示名"},
    {"value": "選択肢3の値", "text": "選択肢3の表示名"}
  ],
  "answer": "正解の値"
}

注意:
- codeには必ず ??? を含めてください
- optionsは3つ作成してください
- answerはoptionsのいずれかのvalueと一致させてください
- 日本語で生成してください"#;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Subset of the `generateContent` response this adapter reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A response part. Non-text parts (inline data, function calls) have no `text`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// Extracts the quiz item from the first part of the first candidate.
pub fn parse_response(resp: GenerateContentResponse) -> Result<GeneratedQuiz, GenerateError> {
    let part = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .ok_or(GenerateError::EmptyResponse)?;

    let text = part.text.ok_or(GenerateError::NonTextPart)?;

    decode_quiz(&text)
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl QuizGenerator for GeminiGenerator {
    async fn generate(&self) -> Result<GeneratedQuiz, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("GEMINI_API_KEY not set");
            GenerateError::MissingApiKey
        })?;

        let payload = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: QUIZ_PROMPT }],
            }],
        };

        tracing::debug!("Requesting quiz generation from model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API error during generateContent: {:?}", e);
                GenerateError::Upstream(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API returned {}: {}", status, body);
            return Err(GenerateError::Upstream(format!("status {}", status)));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode Gemini response: {:?}", e);
            GenerateError::Upstream(e.to_string())
        })?;

        parse_response(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn empty_candidates_is_empty_response() {
        let err = parse_response(response(serde_json::json!({"candidates": []}))).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResponse));

        let err = parse_response(response(serde_json::json!({}))).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResponse));
    }

    #[test]
    fn candidate_without_parts_is_empty_response() {
        let err = parse_response(response(serde_json::json!({
            "candidates": [{"content": {"parts": [], "role": "model"}}]
        })))
        .unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResponse));
    }

    #[test]
    fn non_text_first_part_is_rejected() {
        let err = parse_response(response(serde_json::json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                {"text": "{}"}
            ]}}]
        })))
        .unwrap_err();
        assert!(matches!(err, GenerateError::NonTextPart));
    }

    #[test]
    fn fenced_text_part_is_decoded() {
        let text = "```json\n{\"title\":\"Sum\",\"description\":\"d\",\"code\":\"fn ???() {}\",\"options\":[{\"value\":\"sum\",\"text\":\"sum\"},{\"value\":\"x\",\"text\":\"x\"},{\"value\":\"y\",\"text\":\"y\"}],\"answer\":\"sum\"}\n```";
        let quiz = parse_response(response(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })))
        .unwrap();
        assert_eq!(quiz.title, "Sum");
        assert_eq!(quiz.answer, "sum");
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let generator = GeminiGenerator::new(None, "gemini-2.5-flash", "http://localhost:9000/v1beta/");
        assert_eq!(
            generator.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_call() {
        let generator = GeminiGenerator::new(None, "m", "http://127.0.0.1:1");
        assert!(matches!(
            generator.generate().await,
            Err(GenerateError::MissingApiKey)
        ));
    }
}
