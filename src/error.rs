use thiserror::Error;

#[derive(Error, Debug)]
pub enum DressCodeError {
    /// 判定エンジンのエラー（未知のイベント・不正なカタログ等）
    #[error(transparent)]
    Core(#[from] dress_code_common::Error),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Chave de API não configurada. Defina GEMINI_API_KEY ou use `dress-code-ai config --set-api-key SUA_CHAVE`")]
    MissingApiKey,

    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Pasta não encontrada: {0}")]
    FolderNotFound(String),

    #[error("Erro ao carregar a imagem: {0}")]
    ImageLoad(String),

    #[error("Formato de imagem não suportado: {0} (use jpg, jpeg ou png)")]
    UnsupportedImage(String),

    #[error("Erro ao carregar a imagem da URL. Verifique se o link está correto: {0}")]
    ImageFetch(String),

    #[error("Erro na chamada da API: {0}")]
    ApiCall(String),

    #[error("Nenhuma descrição disponível para a imagem")]
    EmptyDescription,

    #[error("Erro ao gerar áudio: {0}")]
    Narration(String),

    #[error("{failed} de {total} imagem(ns) não puderam ser analisadas")]
    PhotosFailed { failed: usize, total: usize },

    #[error("Nenhuma imagem encontrada: {0}")]
    NoImagesFound(String),

    #[error("Erro de interação: {0}")]
    Interaction(String),

    #[error("Erro de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DressCodeError>;

/// 終了時に stderr へ出すメッセージ（Debug表記ではなくDisplay）
pub fn user_message(err: &DressCodeError) -> String {
    format!("Erro: {}", err)
}
