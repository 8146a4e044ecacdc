//! 差異リスト（エラッタ）
//!
//! 照合結果から「フォルダにあるが台帳にないファイル」と
//! 「台帳にあるがファイルがないID」を並べたテキストを作る。
//! 結果を投影するだけで、集合の再計算はしない。

use crate::engine::ReconciliationResult;

pub const EXTRANEOUS_HEADING: &str = "Extraneous files";
pub const MISSING_HEADING: &str = "Missing documents";

/// 差異リスト（各セクションは昇順）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Errata {
    pub extraneous: Vec<String>,
    pub missing: Vec<String>,
}

impl Errata {
    /// 差異がなければ None
    pub fn from_result(result: &ReconciliationResult) -> Option<Self> {
        if result.is_clean() {
            return None;
        }

        let mut extraneous: Vec<String> = result
            .extraneous
            .iter()
            .map(|e| e.file_name.clone())
            .collect();
        extraneous.sort();

        // BTreeSet なので既にキー順
        let missing = result.missing.iter().map(|k| k.to_string()).collect();

        Some(Self { extraneous, missing })
    }

    /// テキスト本文を生成
    ///
    /// # Arguments
    /// * `generated_at` - 生成日時の表示文字列（呼び出し側で整形）
    pub fn render(&self, generated_at: &str) -> String {
        let mut out = String::new();
        out.push_str("Document link errata\n");
        out.push_str(&format!("Generated: {}\n\n", generated_at));

        push_section(&mut out, EXTRANEOUS_HEADING, &self.extraneous);
        out.push('\n');
        push_section(&mut out, MISSING_HEADING, &self.missing);

        out
    }
}

fn push_section(out: &mut String, heading: &str, items: &[String]) {
    out.push_str(&format!("{} ({}):\n", heading, items.len()));
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        out.push_str(&format!("  {}\n", item));
    }
}
