//! プロンプト生成モジュール
//!
//! 画像説明（視覚障害者向けの自己紹介形式）を依頼するプロンプト。

use crate::catalog::EventDressCode;

/// 画像説明プロンプト生成
///
/// # Arguments
/// * `event` - 判定対象のイベント（指定時はイベント名のみ含める）
///
/// カタログの語彙は含めない。不適切な語を見せると「〜を履いていない」のような
/// 否定表現が増え、部分一致の判定が誤る。
///
/// # Returns
/// pt-BR のプロンプト文字列
pub fn build_description_prompt(event: Option<&EventDressCode>) -> String {
    let mut prompt = String::from(
        "Em português brasileiro, forneça uma descrição detalhada da imagem no formato de \
         autodescrição para pessoas com deficiência visual, com foco especial no que a pessoa \
         está vestindo e calçando. A descrição deve ser respeitosa e profissional.",
    );

    if let Some(event) = event {
        prompt.push_str(&format!(
            "\n\nA foto será usada para avaliar a vestimenta para o evento \"{}\". \
             Descreva apenas as peças de roupa e calçados visíveis, com termos simples e comuns. \
             Não emita opinião sobre a adequação ao evento.",
            event.name
        ));
    }

    prompt
}
