//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use crate::locale::Locale;
use crate::value::MultilingualValue;

/// タグから `Locale` を作成する
///
/// # Arguments
/// * `tag` - ロケールタグ（例: "en", "fi-FI"）
pub(crate) fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

/// (タグ, テキスト) のペアから `MultilingualValue` を作成する
///
/// # Arguments
/// * `pairs` - ロケールタグと翻訳テキストのペア（挿入順を保持）
pub(crate) fn value(pairs: &[(&str, &str)]) -> MultilingualValue {
    MultilingualValue::of_map(pairs.iter().map(|(tag, text)| (locale(tag), *text)))
}
