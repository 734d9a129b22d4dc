use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dress-code-ai")]
#[command(about = "Análise de vestimenta com IA para eventos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (gemini/claude)
    #[arg(long, value_enum, default_value_t = AiProvider::Gemini, global = true)]
    pub ai_provider: AiProvider,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真（ファイル/フォルダ/URL）を解析して服装を判定
    Analyze {
        /// 画像ファイル、写真フォルダ、または http(s) URL
        #[arg(required = true)]
        source: String,

        /// イベント名（省略時は対話的に選択）
        #[arg(short, long)]
        event: Option<String>,

        /// 解析結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 音声ナレーション(MP3)の出力先
        #[arg(short, long)]
        narrate: Option<PathBuf>,

        /// 服装規定カタログJSON（設定より優先）
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// キャッシュを使用（同じ画像の再解析をスキップ）
        #[arg(long)]
        use_cache: bool,
    },

    /// 説明文だけで服装を判定（AI呼び出しなし）
    Evaluate {
        /// イベント名
        #[arg(short, long, required = true)]
        event: String,

        /// 説明文（--file 指定時はテキストファイルのパス）
        #[arg(required = true)]
        description: String,

        /// 説明文をファイルから読む
        #[arg(short, long)]
        file: bool,

        /// 服装規定カタログJSON（設定より優先）
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// 登録イベントの一覧
    Events {
        /// 服装規定カタログJSON（設定より優先）
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデル名を設定
        #[arg(long)]
        set_model: Option<String>,

        /// 服装規定カタログJSONを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
