//! 説明文キャッシュモジュール
//!
//! 前処理済み画像のSHA-256・プロバイダ・モデル・プロンプトをキーに
//! 説明文をキャッシュし、同じ画像の再解析をスキップする。

use crate::ai_provider::AiProvider;
use crate::error::{DressCodeError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".describe-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// キー → 説明文のマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// 写真のファイル名またはURL
    pub label: String,
    pub description: String,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    /// 既定のキャッシュフォルダ
    pub fn default_dir() -> Result<PathBuf> {
        let base = dirs::cache_dir()
            .ok_or_else(|| DressCodeError::Config("diretório de cache não encontrado".into()))?;
        Ok(base.join("dress-code-ai"))
    }

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（存在しない・壊れている場合は空）
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CacheFile>(reader) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                tracing::warn!(path = %cache_path.display(), "cache version mismatch, starting fresh");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %cache_path.display(), error = %e, "unreadable cache, starting fresh");
                Self::default()
            }
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        std::fs::create_dir_all(folder)?;
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除（存在した場合 true）
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(cache_path)?;
        Ok(true)
    }

    /// キャッシュをルックアップ
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.description.as_str())
    }

    /// キャッシュに追加（同じキーは上書き）
    pub fn insert(&mut self, key: String, label: String, description: String) {
        self.entries.insert(key, CacheEntry { label, description });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// キャッシュキー
///
/// プロンプトにイベントの語彙が入るため、プロンプトもキーに含める。
pub fn cache_key(image_hash: &str, provider: AiProvider, model: &str, prompt: &str) -> String {
    let prompt_hash = hex::encode(Sha256::digest(prompt.as_bytes()));
    format!("{}:{}:{}:{}", provider.name(), model, image_hash, &prompt_hash[..16])
}
