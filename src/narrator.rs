//! 音声ナレーションモジュール
//!
//! 解析結果テキストを短いチャンクに分け、Google翻訳の音声合成エンドポイントから
//! MP3を取得して1ファイルに連結する。

use crate::error::{DressCodeError, Result};
use regex::Regex;
use std::path::Path;

const TTS_URL: &str = "https://translate.google.com/translate_tts";

/// エンドポイントが受け付ける1リクエストあたりの最大文字数
pub const MAX_CHUNK_CHARS: usize = 100;

/// テキストを文単位で、max_chars 以下のチャンクに分割
///
/// 空のチャンクは返さない。max_chars を超える単語は文字境界で強制分割する。
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    lazy_static::lazy_static! {
        // 文末記号までを1文とする
        static ref SENTENCE_RE: Regex = Regex::new(r"[^.!?\n]+[.!?]*").unwrap();
    }

    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();

    for sentence in SENTENCE_RE.find_iter(text) {
        let mut current = String::new();
        let mut current_len = 0;

        for word in sentence.as_str().split_whitespace() {
            for piece in split_long_word(word, max_chars) {
                let piece_len = piece.chars().count();
                if current.is_empty() {
                    current = piece;
                    current_len = piece_len;
                } else if current_len + 1 + piece_len <= max_chars {
                    current.push(' ');
                    current.push_str(&piece);
                    current_len += 1 + piece_len;
                } else {
                    chunks.push(std::mem::take(&mut current));
                    current = piece;
                    current_len = piece_len;
                }
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }
    }

    chunks
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars)
        .map(|c| c.iter().collect())
        .collect()
}

/// 音声合成
pub struct Narrator<'a> {
    client: &'a reqwest::Client,
    language: String,
}

impl<'a> Narrator<'a> {
    pub fn new(client: &'a reqwest::Client, language: &str) -> Self {
        Self {
            client,
            language: language.to_string(),
        }
    }

    /// テキストを読み上げたMP3を output に書き出す
    pub async fn narrate(&self, text: &str, output: &Path) -> Result<()> {
        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(DressCodeError::Narration("texto vazio".into()));
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            tracing::debug!(idx, total = %total, "fetching narration chunk");
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();

            let response = self
                .client
                .get(TTS_URL)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", self.language.as_str()),
                    ("client", "tw-ob"),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await
                .map_err(|e| DressCodeError::Narration(e.to_string()))?;

            if !response.status().is_success() {
                return Err(DressCodeError::Narration(format!(
                    "HTTP {} no trecho {}",
                    response.status(),
                    idx
                )));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| DressCodeError::Narration(e.to_string()))?;
            audio.extend_from_slice(&bytes);
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(output, audio).await?;
        Ok(())
    }
}

/// 複数写真の場合は連番付きのファイル名にする
pub fn narration_path(base: &Path, index: usize, total: usize) -> std::path::PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "narracao".to_string());
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "mp3".to_string());

    base.with_file_name(format!("{}_{}.{}", stem, index + 1, ext))
}
