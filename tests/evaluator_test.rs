//! 服装判定シナリオテスト
//!
//! 組み込みカタログに対する判定・フィードバックを検証

use dress_code_common::{DressCodeCatalog, DressCodeEvaluator, Error, Verdict};

fn evaluator() -> DressCodeEvaluator {
    DressCodeEvaluator::new(DressCodeCatalog::builtin().expect("組み込みカタログ読み込み失敗"))
}

/// 適合: 適切な語句のみ
#[test]
fn test_funeral_compliant() {
    let result = evaluator()
        .evaluate("Funeral", "A pessoa está vestindo terno preto e sapato social.")
        .unwrap();

    assert_eq!(result.matched_appropriate, vec!["terno preto", "sapato social"]);
    assert!(result.matched_inappropriate.is_empty());
    assert!(result.is_appropriate);
    assert_eq!(result.verdict(), Verdict::Appropriate);
}

/// 不適合: 不適切な語句のみ
#[test]
fn test_wedding_non_compliant() {
    let result = evaluator()
        .evaluate("Casamento", "A pessoa está usando jeans e tênis.")
        .unwrap();

    assert!(result.matched_appropriate.is_empty());
    assert_eq!(result.matched_inappropriate, vec!["jeans", "tênis"]);
    assert!(!result.is_appropriate);
}

/// 混在: 不適切が優先
#[test]
fn test_mixed_evidence_is_not_appropriate() {
    let result = evaluator().evaluate("Funeral", "terno preto com tênis").unwrap();

    assert_eq!(result.matched_appropriate, vec!["terno preto"]);
    assert_eq!(result.matched_inappropriate, vec!["tênis"]);
    assert!(!result.is_appropriate);
    assert_eq!(result.verdict(), Verdict::Inappropriate);
}

/// 大文字小文字を区別しない
#[test]
fn test_case_insensitive() {
    let ev = evaluator();
    let upper = ev.evaluate("Funeral", "TERNO PRETO").unwrap();
    let lower = ev.evaluate("Funeral", "terno preto").unwrap();

    assert_eq!(upper.matched_appropriate, lower.matched_appropriate);
    assert_eq!(upper.matched_inappropriate, lower.matched_inappropriate);
    assert_eq!(upper, lower);
}

/// 空文字はエラーにならず判定不能
#[test]
fn test_empty_description() {
    let result = evaluator().evaluate("Funeral", "").unwrap();

    assert!(!result.is_appropriate);
    assert!(result.matched_appropriate.is_empty());
    assert!(result.matched_inappropriate.is_empty());
    assert_eq!(result.verdict(), Verdict::Indeterminate);
}

/// 服装と無関係な説明・他言語
#[test]
fn test_unrelated_or_foreign_text() {
    let ev = evaluator();
    for text in ["Uma paisagem com montanhas.", "A person wearing a black suit.", "黒いスーツ"] {
        let result = ev.evaluate("Funeral", text).unwrap();
        assert!(result.is_indeterminate(), "判定不能になるべき: {}", text);
        assert!(!result.is_appropriate);
    }
}

/// 未登録イベント
#[test]
fn test_unknown_event() {
    let err = evaluator().evaluate("Birthday", "terno preto").unwrap_err();

    match &err {
        Error::UnknownEvent { event, available } => {
            assert_eq!(event, "Birthday");
            assert!(available.contains(&"Funeral".to_string()));
            assert!(available.contains(&"Casamento".to_string()));
        }
        other => panic!("Expected UnknownEvent, got {:?}", other),
    }

    let display = err.to_string();
    assert!(display.contains("Birthday"));
    assert!(display.contains("Funeral"));
}

/// 同じ入力は同じ結果
#[test]
fn test_deterministic() {
    let ev = evaluator();
    let text = "Vestido preto, sapato social e uma camiseta por baixo.";
    let first = ev.analyze("Funeral", text).unwrap();
    let second = ev.analyze("Funeral", text).unwrap();
    assert_eq!(first, second);
}

/// 否定表現も一致する（既知の制限）
#[test]
fn test_negation_still_matches() {
    let result = evaluator()
        .evaluate("Casamento", "A pessoa não está vestindo terno.")
        .unwrap();
    assert_eq!(result.matched_appropriate, vec!["terno"]);
}

/// 説明文の後にフィードバックが付く
#[test]
fn test_analysis_full_text() {
    let description = "A pessoa está usando jeans e tênis.";
    let analysis = evaluator().analyze("Casamento", description).unwrap();
    let full = analysis.full_text();

    assert!(full.starts_with(description));
    assert!(full.contains("não está adequada"));
    assert!(full.contains("jeans e tênis"));
    assert!(full.contains("Sugestão"));
}

/// 評価器は複数スレッドから共有できる
#[test]
fn test_concurrent_evaluation() {
    let ev = evaluator();
    let shared = &ev;
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || shared.evaluate("Funeral", "terno preto").unwrap()))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_appropriate);
        }
    });
}
