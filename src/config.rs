use crate::error::{DressCodeError, Result};
use dress_code_common::DressCodeCatalog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIキーを探す環境変数（優先順）
const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub max_image_size: u32,
    pub timeout_seconds: u64,
    /// 服装規定カタログ（JSON）。未設定なら組み込みカタログ
    pub catalog_path: Option<PathBuf>,
    /// 音声合成の言語コード
    pub tts_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".into(),
            max_image_size: 1568,
            timeout_seconds: 120,
            catalog_path: None,
            tts_language: "pt-br".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DressCodeError::Config("diretório home não encontrado".into()))?;
        Ok(home.join(".config").join("dress-code-ai").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        for var in API_KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Ok(key);
                }
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(DressCodeError::MissingApiKey)
    }

    pub fn has_api_key(&self) -> bool {
        self.get_api_key().is_ok()
    }

    /// カタログを読み込み
    ///
    /// 優先順: 引数 > 設定ファイルの catalog_path > 組み込み
    pub fn load_catalog(&self, override_path: Option<&Path>) -> Result<DressCodeCatalog> {
        let path = override_path.or(self.catalog_path.as_deref());

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(DressCodeError::FileNotFound(path.display().to_string()));
                }
                tracing::debug!(path = %path.display(), "loading dress code catalog");
                Ok(DressCodeCatalog::from_file(path)?)
            }
            None => Ok(DressCodeCatalog::builtin()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.max_image_size, 1568);
        assert_eq!(config.tts_language, "pt-br");
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_key: Some("abc".into()),
            model: "gemini-2.0-flash".into(),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("abc"));
        assert_eq!(loaded.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"model": "gemini-pro-vision"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "gemini-pro-vision");
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_load_catalog_builtin() {
        let catalog = Config::default().load_catalog(None).unwrap();
        assert!(catalog.get("Funeral").is_some());
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let result = Config::default().load_catalog(Some(Path::new("/nonexistent/catalog.json")));
        assert!(matches!(result, Err(DressCodeError::FileNotFound(_))));
    }
}
