//! ドキュメントIDの正規化
//!
//! 台帳のセル値とファイル名を同じ土俵で比較するためのキーを作る。
//! 前後の空白を除去し、大文字に揃える。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 正規化済みのドキュメントID
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 空キーは照合対象にならない
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 生の文字列をキーに変換する
///
/// 空文字・空白のみの入力は空キーになる。
pub fn normalize(raw: &str) -> Key {
    Key(raw.trim().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_case_fold() {
        assert_eq!(normalize(" abc "), normalize("ABC"));
        assert_eq!(normalize("\tDoc-001\n").as_str(), "DOC-001");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["", "  ", " a1 ", "Straße", "ǅ", "MiXeD 12 "] {
            let once = normalize(raw);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "入力: {:?}", raw);
        }
    }

    #[test]
    fn test_blank_is_empty_key() {
        assert!(normalize("").is_empty());
        assert!(normalize("   ").is_empty());
        assert!(normalize("\u{3000}").is_empty()); // 全角スペース
        assert!(!normalize(" x ").is_empty());
    }

    #[test]
    fn test_inner_whitespace_kept() {
        assert_eq!(normalize(" a  b ").as_str(), "A  B");
    }

    #[test]
    fn test_serialize_transparent() {
        let json = serde_json::to_string(&normalize("b1")).unwrap();
        assert_eq!(json, "\"B1\"");
    }
}
