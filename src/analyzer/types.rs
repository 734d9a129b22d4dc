use crate::ai_provider::AiProvider;
use chrono::{DateTime, Local};
use dress_code_common::{Analysis, EvaluationResult, Verdict};
use serde::{Deserialize, Serialize};

/// 写真1枚分の解析レポート（JSON出力用）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub source: String,
    pub event: String,
    pub description: String,
    pub evaluation: EvaluationResult,
    pub verdict: Verdict,
    pub feedback: String,
    pub provider: String,
    pub model: String,
    pub analyzed_at: DateTime<Local>,
}

impl AnalysisReport {
    pub fn new(source: String, analysis: &Analysis, provider: AiProvider, model: &str) -> Self {
        Self {
            source,
            event: analysis.evaluation.event.clone(),
            description: analysis.description.clone(),
            evaluation: analysis.evaluation.clone(),
            verdict: analysis.evaluation.verdict(),
            feedback: analysis.feedback.clone(),
            provider: provider.name().to_string(),
            model: model.to_string(),
            analyzed_at: Local::now(),
        }
    }
}
