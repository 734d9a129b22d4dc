//! 複数写真の一括解析
//!
//! 1枚の失敗で全体を止めない。失敗した写真は記録して次へ進み、
//! 成功分のレポートとキャッシュは呼び出し側で必ず保存できるようにする。

use super::{AnalysisReport, CacheFile, Describer};
use crate::error::{DressCodeError, Result};
use crate::narrator;
use crate::source::{self, PhotoRef};
use dress_code_common::{Analysis, DressCodeEvaluator};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// 一括解析の設定
pub struct BatchOptions<'a> {
    pub event: &'a str,
    pub prompt: &'a str,
    pub max_image_size: u32,
    /// 音声ナレーションの出力先（Noneなら生成しない）
    pub narrate: Option<&'a Path>,
    pub tts_language: &'a str,
}

/// 解析に失敗した写真
#[derive(Debug)]
pub struct PhotoFailure {
    pub source: String,
    pub error: DressCodeError,
}

/// 一括解析の結果
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<AnalysisReport>,
    pub failures: Vec<PhotoFailure>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    pub fn appropriate_count(&self) -> usize {
        self.reports.iter().filter(|r| r.evaluation.is_appropriate).count()
    }

    /// 成功分のレポートをJSONで書き出す
    pub fn write_report(&self, output: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.reports)?;
        std::fs::write(output, json)?;
        Ok(())
    }

    /// 1枚でも失敗していればエラー
    pub fn check(&self) -> Result<()> {
        if self.failures.is_empty() {
            return Ok(());
        }
        Err(DressCodeError::PhotosFailed {
            failed: self.failures.len(),
            total: self.total(),
        })
    }
}

/// 写真を順に解析して判定
pub async fn analyze_photos(
    photos: &[PhotoRef],
    evaluator: &DressCodeEvaluator,
    describer: &Describer,
    mut cache: Option<&mut CacheFile>,
    options: &BatchOptions<'_>,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (idx, photo) in photos.iter().enumerate() {
        let label = photo.label();
        println!("--- [{}/{}] {} ---", idx + 1, photos.len(), label);

        let analysis =
            match analyze_photo(photo, &label, evaluator, describer, cache.as_deref_mut(), options).await {
                Ok(analysis) => analysis,
                Err(error) => {
                    tracing::error!(photo = %label, %error, "photo analysis failed");
                    eprintln!("✖ {}: {}\n", label, error);
                    outcome.failures.push(PhotoFailure { source: label, error });
                    continue;
                }
            };

        println!("{}\n", analysis.full_text());

        // ナレーション失敗は警告のみ
        if let Some(base) = options.narrate {
            let path = narrator::narration_path(base, idx, photos.len());
            let voice = narrator::Narrator::new(describer.client(), options.tts_language);
            match voice.narrate(&analysis.full_text(), &path).await {
                Ok(()) => println!("🔊 Narração salva: {}\n", path.display()),
                Err(e) => eprintln!("⚠ {}\n", e),
            }
        }

        outcome.reports.push(AnalysisReport::new(
            label,
            &analysis,
            describer.provider(),
            describer.model(),
        ));
    }

    outcome
}

async fn analyze_photo(
    photo: &PhotoRef,
    label: &str,
    evaluator: &DressCodeEvaluator,
    describer: &Describer,
    cache: Option<&mut CacheFile>,
    options: &BatchOptions<'_>,
) -> Result<Analysis> {
    let raw = photo.fetch(describer.client()).await?;
    let image = source::prepare_image(&raw, options.max_image_size)?;
    tracing::debug!(width = image.width, height = image.height, "image prepared");

    let spinner = spinner("Analisando a imagem...");
    let described = describer
        .describe_cached(&image, options.prompt, label, cache)
        .await;
    spinner.finish_and_clear();

    Ok(evaluator.analyze(options.event, &described?)?)
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
