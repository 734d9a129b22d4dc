//! 写真のAI説明文からイベントの服装規定への適合を判定するツール
//!
//! 判定エンジン本体は dress_code_common。このクレートは画像取得・
//! AIによる説明文生成・音声ナレーション・設定・CLIを担当する。

pub mod ai_provider;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod event_picker;
pub mod narrator;
pub mod source;
