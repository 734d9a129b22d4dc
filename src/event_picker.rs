//! 対話式イベント選択

use crate::error::{DressCodeError, Result};
use dialoguer::Select;
use dress_code_common::DressCodeCatalog;

/// 判定対象のイベント名を決定
///
/// 指定があればカタログに存在するか検証し、なければ一覧から選択させる。
pub fn resolve_event(catalog: &DressCodeCatalog, requested: Option<String>) -> Result<String> {
    match requested {
        Some(name) => {
            catalog.lookup(&name)?;
            Ok(name)
        }
        None => pick_event(catalog),
    }
}

fn pick_event(catalog: &DressCodeCatalog) -> Result<String> {
    let names: Vec<&str> = catalog.names().collect();

    let selection = Select::new()
        .with_prompt("Selecione o evento")
        .items(&names)
        .default(0)
        .interact()
        .map_err(|e| DressCodeError::Interaction(e.to_string()))?;

    Ok(names[selection].to_string())
}
