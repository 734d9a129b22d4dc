//! 服装規定カタログモジュール
//!
//! イベント名 → 服装規定 のマッピング。
//! 構築時に検証し、以降は変更不可（変更用のAPIを持たない）。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 組み込みカタログ（JSON）
const DEFAULT_CATALOG_JSON: &str = include_str!("../data/default_catalog.json");

/// イベント1件分の服装規定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDressCode {
    /// イベント名（一意）
    pub name: String,
    /// 適切な服装を示す語句（小文字）
    pub appropriate: Vec<String>,
    /// 不適切な服装を示す語句（小文字）
    pub inappropriate: Vec<String>,
    /// 期待される服装の説明文
    pub description: String,
    /// 適切な場合に褒めるポイント（順序あり）
    pub praise_points: Vec<String>,
}

impl EventDressCode {
    /// 不変条件を検証
    ///
    /// - 各リストが空でない
    /// - 語句は空白のみでなく、小文字で、リスト内で重複しない
    /// - appropriate と inappropriate が互いに素
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidCatalog("evento sem nome".into()));
        }
        if self.praise_points.is_empty() {
            return Err(Error::InvalidCatalog(format!(
                "evento '{}' sem pontos de elogio",
                self.name
            )));
        }

        let appropriate = self.phrase_set("appropriate", &self.appropriate)?;
        let inappropriate = self.phrase_set("inappropriate", &self.inappropriate)?;

        let mut overlap: Vec<&str> = appropriate.intersection(&inappropriate).copied().collect();
        if !overlap.is_empty() {
            overlap.sort_unstable();
            return Err(Error::InvalidCatalog(format!(
                "evento '{}': termos em ambas as listas: {}",
                self.name,
                overlap.join(", ")
            )));
        }

        Ok(())
    }

    fn phrase_set<'a>(&self, field: &str, phrases: &'a [String]) -> Result<HashSet<&'a str>> {
        if phrases.is_empty() {
            return Err(Error::InvalidCatalog(format!(
                "evento '{}': lista '{}' vazia",
                self.name, field
            )));
        }

        let mut set = HashSet::with_capacity(phrases.len());
        for phrase in phrases {
            if phrase.trim().is_empty() {
                return Err(Error::InvalidCatalog(format!(
                    "evento '{}': termo vazio em '{}'",
                    self.name, field
                )));
            }
            if *phrase != phrase.to_lowercase() {
                return Err(Error::InvalidCatalog(format!(
                    "evento '{}': termo '{}' deve estar em minúsculas",
                    self.name, phrase
                )));
            }
            if !set.insert(phrase.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "evento '{}': termo '{}' duplicado em '{}'",
                    self.name, phrase, field
                )));
            }
        }
        Ok(set)
    }
}

/// カタログファイルの構造
#[derive(Debug, Deserialize)]
struct CatalogFile {
    events: Vec<EventDressCode>,
}

/// 検証済みの服装規定カタログ
#[derive(Debug, Clone)]
pub struct DressCodeCatalog {
    events: Vec<EventDressCode>,
}

impl DressCodeCatalog {
    /// イベント一覧からカタログを構築（検証付き）
    pub fn new(events: Vec<EventDressCode>) -> Result<Self> {
        if events.is_empty() {
            return Err(Error::InvalidCatalog("nenhum evento definido".into()));
        }

        let mut names = HashSet::new();
        for event in &events {
            event.validate()?;
            if !names.insert(event.name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "evento '{}' definido mais de uma vez",
                    event.name
                )));
            }
        }

        Ok(Self { events })
    }

    /// 組み込みカタログ
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_CATALOG_JSON)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.events)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// イベントを名前で取得
    pub fn get(&self, name: &str) -> Option<&EventDressCode> {
        self.events.iter().find(|e| e.name == name)
    }

    /// イベントを名前で取得（存在しなければ UnknownEvent）
    pub fn lookup(&self, name: &str) -> Result<&EventDressCode> {
        self.get(name).ok_or_else(|| Error::UnknownEvent {
            event: name.to_string(),
            available: self.names().map(str::to_string).collect(),
        })
    }

    /// イベント名一覧（定義順）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.name.as_str())
    }

    pub fn events(&self) -> &[EventDressCode] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, appropriate: &[&str], inappropriate: &[&str]) -> EventDressCode {
        EventDressCode {
            name: name.to_string(),
            appropriate: appropriate.iter().map(|s| s.to_string()).collect(),
            inappropriate: inappropriate.iter().map(|s| s.to_string()).collect(),
            description: "traje de teste".to_string(),
            praise_points: vec!["capricho".to_string()],
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = DressCodeCatalog::builtin().unwrap();
        assert!(catalog.len() >= 2);
        assert!(catalog.get("Funeral").is_some());
        assert!(catalog.get("Casamento").is_some());
    }

    #[test]
    fn test_builtin_catalog_keeps_definition_order() {
        let catalog = DressCodeCatalog::builtin().unwrap();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names[0], "Funeral");
        assert_eq!(names[1], "Casamento");
    }

    #[test]
    fn test_lookup_unknown_lists_available() {
        let catalog = DressCodeCatalog::builtin().unwrap();
        match catalog.lookup("Birthday") {
            Err(Error::UnknownEvent { event, available }) => {
                assert_eq!(event, "Birthday");
                assert!(available.contains(&"Funeral".to_string()));
            }
            other => panic!("Expected UnknownEvent, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = DressCodeCatalog::builtin().unwrap();
        assert!(catalog.lookup("funeral").is_err());
    }

    #[test]
    fn test_reject_overlapping_phrases() {
        let result = DressCodeCatalog::new(vec![event("Festa", &["jeans", "blazer"], &["jeans"])]);
        match result {
            Err(Error::InvalidCatalog(msg)) => assert!(msg.contains("jeans")),
            other => panic!("Expected InvalidCatalog, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_empty_lists() {
        assert!(DressCodeCatalog::new(vec![event("Festa", &[], &["jeans"])]).is_err());
        assert!(DressCodeCatalog::new(vec![event("Festa", &["blazer"], &[])]).is_err());

        let mut no_praise = event("Festa", &["blazer"], &["jeans"]);
        no_praise.praise_points.clear();
        assert!(DressCodeCatalog::new(vec![no_praise]).is_err());
    }

    #[test]
    fn test_reject_uppercase_phrase() {
        let result = DressCodeCatalog::new(vec![event("Festa", &["Blazer"], &["jeans"])]);
        assert!(matches!(result, Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn test_reject_blank_and_duplicate_phrases() {
        assert!(DressCodeCatalog::new(vec![event("Festa", &["  "], &["jeans"])]).is_err());
        assert!(DressCodeCatalog::new(vec![event("Festa", &["blazer", "blazer"], &["jeans"])]).is_err());
    }

    #[test]
    fn test_reject_duplicate_event_names() {
        let result = DressCodeCatalog::new(vec![
            event("Festa", &["blazer"], &["jeans"]),
            event("Festa", &["terno"], &["chinelo"]),
        ]);
        assert!(matches!(result, Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn test_reject_empty_catalog() {
        assert!(DressCodeCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_from_json_missing_field() {
        let json = r#"{"events": [{"name": "Festa", "appropriate": ["blazer"]}]}"#;
        assert!(matches!(DressCodeCatalog::from_json(json), Err(Error::Json(_))));
    }
}
