//! 服装判定エンジン
//!
//! 説明文に含まれる語句（大文字小文字を無視した部分一致）で
//! イベントの服装規定への適合を判定し、フィードバック文を生成する。
//!
//! 判定ルール:
//! - 不適切な語句が1つでもあれば不適合（不適切が優先）
//! - 適切な語句のみがあれば適合
//! - どちらもなければ判定不能 → 不適合として扱い、警告ログを出す
//!
//! 単純な部分一致のため否定表現（「não está vestindo terno」）も一致する。

use crate::catalog::{DressCodeCatalog, EventDressCode};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// 判定区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Appropriate,
    Inappropriate,
    /// どちらの語句も見つからない
    Indeterminate,
}

/// 判定結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub event: String,
    pub is_appropriate: bool,
    /// 見つかった適切語句（カタログ定義順）
    pub matched_appropriate: Vec<String>,
    /// 見つかった不適切語句（カタログ定義順）
    pub matched_inappropriate: Vec<String>,
}

impl EvaluationResult {
    pub fn verdict(&self) -> Verdict {
        if !self.matched_inappropriate.is_empty() {
            Verdict::Inappropriate
        } else if !self.matched_appropriate.is_empty() {
            Verdict::Appropriate
        } else {
            Verdict::Indeterminate
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        self.verdict() == Verdict::Indeterminate
    }
}

/// 説明文 + 判定 + フィードバック
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub description: String,
    pub evaluation: EvaluationResult,
    pub feedback: String,
}

impl Analysis {
    /// 元の説明文の後ろにフィードバックを付けた表示用テキスト
    pub fn full_text(&self) -> String {
        let description = self.description.trim_end();
        if description.is_empty() {
            self.feedback.clone()
        } else {
            format!("{}\n\n{}", description, self.feedback)
        }
    }
}

/// 服装判定器
///
/// カタログは構築後に変更されないため、参照を共有すれば
/// 複数スレッドから同時に呼び出せる。
#[derive(Debug, Clone)]
pub struct DressCodeEvaluator {
    catalog: DressCodeCatalog,
}

impl DressCodeEvaluator {
    pub fn new(catalog: DressCodeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DressCodeCatalog {
        &self.catalog
    }

    /// 説明文をイベントの服装規定で判定
    pub fn evaluate(&self, event_name: &str, description: &str) -> Result<EvaluationResult> {
        let event = self.catalog.lookup(event_name)?;
        let text = description.to_lowercase();

        let matched_appropriate = find_phrases(&text, &event.appropriate);
        let matched_inappropriate = find_phrases(&text, &event.inappropriate);

        let is_appropriate = !matched_appropriate.is_empty() && matched_inappropriate.is_empty();

        if matched_appropriate.is_empty() && matched_inappropriate.is_empty() {
            tracing::warn!(
                event = event_name,
                text_len = description.len(),
                "no dress code vocabulary matched; treating as not appropriate"
            );
        } else {
            tracing::debug!(
                event = event_name,
                appropriate = ?matched_appropriate,
                inappropriate = ?matched_inappropriate,
                is_appropriate,
                "dress code evaluated"
            );
        }

        Ok(EvaluationResult {
            event: event.name.clone(),
            is_appropriate,
            matched_appropriate,
            matched_inappropriate,
        })
    }

    /// 判定結果からフィードバック文を生成
    pub fn render_feedback(&self, event_name: &str, result: &EvaluationResult) -> Result<String> {
        let event = self.catalog.lookup(event_name)?;
        Ok(if result.is_appropriate {
            affirming_feedback(event, result)
        } else {
            corrective_feedback(event, result)
        })
    }

    /// 判定とフィードバック生成をまとめて実行
    pub fn analyze(&self, event_name: &str, description: &str) -> Result<Analysis> {
        let evaluation = self.evaluate(event_name, description)?;
        let feedback = self.render_feedback(event_name, &evaluation)?;
        Ok(Analysis {
            description: description.to_string(),
            evaluation,
            feedback,
        })
    }
}

/// 小文字化済みテキストに含まれる語句を抽出
fn find_phrases(lowered_text: &str, phrases: &[String]) -> Vec<String> {
    phrases
        .iter()
        .filter(|p| lowered_text.contains(p.to_lowercase().as_str()))
        .cloned()
        .collect()
}

fn affirming_feedback(event: &EventDressCode, result: &EvaluationResult) -> String {
    format!(
        "Avaliação para o evento {}: a vestimenta está adequada.\n\
         Parabéns! O traje atende ao esperado: {}. \
         Sua escolha demonstra {}.\n\
         Itens adequados identificados: {}.",
        event.name,
        event.description,
        join_pt(&event.praise_points),
        join_pt(&result.matched_appropriate),
    )
}

fn corrective_feedback(event: &EventDressCode, result: &EvaluationResult) -> String {
    let mut lines = Vec::new();

    if result.is_indeterminate() {
        lines.push(format!(
            "Avaliação para o evento {}: não foi possível confirmar a adequação da vestimenta.",
            event.name
        ));
        lines.push(
            "Nenhum item de vestuário do evento foi reconhecido na descrição.".to_string(),
        );
    } else {
        lines.push(format!(
            "Avaliação para o evento {}: a vestimenta não está adequada.",
            event.name
        ));
    }

    lines.push(format!("Para este evento, espera-se {}.", event.description));

    if !result.matched_inappropriate.is_empty() {
        lines.push(format!(
            "Itens inadequados identificados: {}.",
            join_pt(&result.matched_inappropriate)
        ));
    }

    lines.push(format!(
        "Sugestão: prefira {}.",
        join_with(&event.appropriate, "ou")
    ));

    lines.join("\n")
}

/// 「a, b e c」形式で連結
fn join_pt(items: &[String]) -> String {
    join_with(items, "e")
}

fn join_with(items: &[String], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} {} {}", init.join(", "), conjunction, last),
    }
}
