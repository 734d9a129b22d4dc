//! 画像説明モジュール
//!
//! 選択したAIプロバイダで写真の説明文（pt-BR）を生成する。

pub mod batch;
pub mod cache;
mod claude_cli;
mod gemini;
mod types;

pub use batch::{analyze_photos, BatchOptions, BatchOutcome, PhotoFailure};
pub use cache::CacheFile;
pub use types::AnalysisReport;

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::{DressCodeError, Result};
use crate::source::PreparedImage;
use std::time::Duration;

/// 画像説明の生成器
pub struct Describer {
    provider: AiProvider,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl Describer {
    pub fn new(provider: AiProvider, config: &Config) -> Result<Self> {
        // Gemini以外はAPIキー不要
        let api_key = match provider {
            AiProvider::Gemini => Some(config.get_api_key()?),
            AiProvider::Claude => None,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DressCodeError::Config(format!("cliente HTTP: {}", e)))?;

        Ok(Self {
            provider,
            model: config.model.clone(),
            api_key,
            client,
        })
    }

    pub fn provider(&self) -> AiProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        match self.provider {
            AiProvider::Gemini => &self.model,
            AiProvider::Claude => "claude-cli",
        }
    }

    /// 画像URL取得・音声合成と共有するHTTPクライアント
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// 説明文を生成
    pub async fn describe(&self, image: &PreparedImage, prompt: &str) -> Result<String> {
        let text = match self.provider {
            AiProvider::Gemini => {
                let api_key = self.api_key.as_deref().ok_or(DressCodeError::MissingApiKey)?;
                gemini::describe(&self.client, api_key, &self.model, image, prompt).await?
            }
            AiProvider::Claude => claude_cli::describe(image, prompt).await?,
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(DressCodeError::EmptyDescription);
        }

        tracing::debug!(provider = %self.provider, chars = text.chars().count(), "description received");
        Ok(text.to_string())
    }

    /// キャッシュを使って説明文を取得
    ///
    /// キャッシュにあればAIを呼ばない。なければ生成してキャッシュに追加する。
    pub async fn describe_cached(
        &self,
        image: &PreparedImage,
        prompt: &str,
        label: &str,
        cache: Option<&mut CacheFile>,
    ) -> Result<String> {
        let Some(cache) = cache else {
            return self.describe(image, prompt).await;
        };

        let key = cache::cache_key(&image.content_hash(), self.provider, self.model(), prompt);
        if let Some(description) = cache.get(&key) {
            tracing::debug!(label, "description cache hit");
            return Ok(description.to_string());
        }

        let description = self.describe(image, prompt).await?;
        cache.insert(key, label.to_string(), description.clone());
        Ok(description)
    }
}
