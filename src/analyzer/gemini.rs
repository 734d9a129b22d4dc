//! Gemini API連携
//!
//! プロンプト + インライン画像を generateContent に送信し、説明文を取得する。

use crate::error::{DressCodeError, Result};
use crate::source::PreparedImage;
use serde::{Deserialize, Serialize};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

fn build_request(image: &PreparedImage, prompt: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text { text: prompt.to_string() },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.to_string(),
                        data: image.to_base64(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig { temperature: 0.4 },
    }
}

/// 最初の候補のテキストを連結
fn extract_text(response: GeminiResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
        .unwrap_or_default()
}

pub async fn describe(
    client: &reqwest::Client,
    api_key: &str,
    model: &str,
    image: &PreparedImage,
    prompt: &str,
) -> Result<String> {
    let url = format!("{}/{}:generateContent", GEMINI_API_BASE, model);
    let request = build_request(image, prompt);

    tracing::debug!(model, bytes = image.bytes.len(), "calling Gemini generateContent");

    let response = client
        .post(&url)
        .query(&[("key", api_key)])
        .json(&request)
        .send()
        .await
        .map_err(|e| DressCodeError::ApiCall(format!("Gemini: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(DressCodeError::ApiCall(format!(
            "Gemini retornou HTTP {}: {}",
            status, body
        )));
    }

    let payload: GeminiResponse = response
        .json()
        .await
        .map_err(|e| DressCodeError::ApiCall(format!("resposta inválida do Gemini: {}", e)))?;

    Ok(extract_text(payload))
}
