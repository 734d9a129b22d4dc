//! Claude CLI連携モジュール
//!
//! 前処理済み画像を一時フォルダに書き出し、`claude -p` にパスを渡して説明文を得る。

use crate::error::{DressCodeError, Result};
use crate::source::PreparedImage;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub async fn describe(image: &PreparedImage, prompt: &str) -> Result<String> {
    let temp_dir = get_temp_dir()?;
    let image_path = write_temp_image(image, &temp_dir).await?;

    let full_prompt = build_cli_prompt(&image_path, prompt);
    tracing::debug!(chars = full_prompt.len(), "claude CLI prompt built");

    let result = run_claude_cli(&full_prompt).await;

    // 一時ファイルの削除失敗は無視
    tokio::fs::remove_file(&image_path).await.ok();

    result
}

fn get_temp_dir() -> Result<PathBuf> {
    let temp_dir = std::env::temp_dir().join("dress-code-ai");
    std::fs::create_dir_all(&temp_dir)?;
    Ok(temp_dir)
}

async fn write_temp_image(image: &PreparedImage, temp_dir: &Path) -> Result<PathBuf> {
    let dest = temp_dir.join(format!("{}.jpg", image.content_hash()));
    tokio::fs::write(&dest, &image.bytes).await?;
    // 絶対パスに変換
    Ok(std::fs::canonicalize(&dest)?)
}

/// 改行をスペースに置換してコマンド引数として渡せる形にする
fn build_cli_prompt(image_path: &Path, prompt: &str) -> String {
    let path = image_path.display().to_string().replace('\\', "/");
    let raw_prompt = format!(
        "Read the following image file and describe it: {}\n\n{}",
        path, prompt
    );
    raw_prompt.replace('\n', " ")
}

/// cmd /c 経由ではダブルクォートをエスケープする
#[cfg(windows)]
fn shell_arg(prompt: &str) -> String {
    prompt.replace('"', "\\\"")
}

/// シェルを通さないのでそのまま渡す
#[cfg(not(windows))]
fn shell_arg(prompt: &str) -> String {
    prompt.to_string()
}

async fn run_claude_cli(prompt: &str) -> Result<String> {
    let prompt = shell_arg(prompt);
    let prompt = prompt.as_str();

    // Windowsではcmd /c経由
    #[cfg(windows)]
    let output = Command::new("cmd")
        .args(["/c", "claude", "-p", prompt, "--output-format", "text"])
        .output()
        .await
        .map_err(|e| DressCodeError::ApiCall(format!("falha ao executar o Claude CLI: {}", e)))?;

    #[cfg(not(windows))]
    let output = Command::new("claude")
        .args(["-p", prompt, "--output-format", "text"])
        .output()
        .await
        .map_err(|e| DressCodeError::ApiCall(format!("falha ao executar o Claude CLI: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DressCodeError::ApiCall(format!(
            "Claude CLI failed (code {:?}): {}",
            output.status.code(),
            stderr
        )));
    }

    let response = String::from_utf8_lossy(&output.stdout).to_string();

    let preview: String = response.chars().take(200).collect();
    tracing::debug!(%preview, "claude CLI response");

    Ok(response)
}
