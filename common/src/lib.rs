//! Dress Code Common Library
//!
//! イベント別の服装規定カタログと、説明文からの服装判定エンジン。
//! I/Oを持たないため、CLI以外のフロントエンドからも共有できる。

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod prompts;

pub use catalog::{DressCodeCatalog, EventDressCode};
pub use error::{Error, Result};
pub use evaluator::{Analysis, DressCodeEvaluator, EvaluationResult, Verdict};
pub use prompts::build_description_prompt;
