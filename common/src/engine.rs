//! 照合エンジン
//!
//! 1つのグリッド（シートまたはテーブル）のID列を上から読み、
//! ファイルインデックスと突き合わせる。結果はグリッドごとの `SheetOutcome` として返し、
//! 呼び出し側が `Reconciliation` に集約する。集約は集合と合計だけなので、
//! どの順番で取り込んでも最終結果は変わらない。

use crate::file_index::{FileEntry, FileIndex};
use crate::grid::{CellGrid, GridSource};
use crate::header::HeaderLocation;
use crate::normalizer::{normalize, Key};
use serde::Serialize;
use std::collections::BTreeSet;

/// セルに付けるハイパーリンク
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hyperlink {
    pub row: u32,
    pub col: u32,
    /// ドキュメントフォルダ名/ファイル名 の相対パス
    pub target: String,
    /// セルに表示するテキスト（元の値をそのまま使う）
    pub text: String,
}

/// 進捗通知の間隔
///
/// `interval` 行ごとにコールバックを呼ぶ。0 なら通知しない。
pub struct Progress<'a> {
    interval: usize,
    callback: Box<dyn FnMut(usize) + 'a>,
}

impl<'a> Progress<'a> {
    pub fn new(interval: usize, callback: impl FnMut(usize) + 'a) -> Self {
        Self {
            interval,
            callback: Box::new(callback),
        }
    }

    pub fn none() -> Self {
        Self::new(0, |_| {})
    }

    fn tick(&mut self, processed: usize) {
        if self.interval > 0 && processed % self.interval == 0 {
            (self.callback)(processed);
        }
    }
}

/// グリッド1つ分の照合結果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetOutcome {
    pub source: GridSource,
    pub header: HeaderLocation,
    pub links: Vec<Hyperlink>,
    pub matched: BTreeSet<Key>,
    pub missing: BTreeSet<Key>,
    /// ID が入っていた行数
    pub rows_scanned: usize,
}

/// ヘッダーより下の行を照合する
pub fn reconcile(
    grid: &CellGrid,
    header: HeaderLocation,
    index: &FileIndex,
    folder_name: &str,
    progress: &mut Progress<'_>,
) -> SheetOutcome {
    let mut outcome = SheetOutcome {
        source: grid.source.clone(),
        header,
        links: Vec::new(),
        matched: BTreeSet::new(),
        missing: BTreeSet::new(),
        rows_scanned: 0,
    };

    for (row, text) in grid.column_below(header) {
        let key = normalize(text);
        if key.is_empty() {
            continue;
        }
        outcome.rows_scanned += 1;

        match index.get(&key) {
            Some(entry) => {
                outcome.links.push(Hyperlink {
                    row,
                    col: header.col,
                    target: link_target(folder_name, entry),
                    text: text.to_string(),
                });
                outcome.matched.insert(key);
            }
            None => {
                outcome.missing.insert(key);
            }
        }

        progress.tick(outcome.rows_scanned);
    }

    outcome
}

/// ドキュメントフォルダ名とファイル名を `/` でつなぐ
pub fn link_target(folder_name: &str, entry: &FileEntry) -> String {
    if folder_name.is_empty() {
        entry.file_name.clone()
    } else {
        format!("{}/{}", folder_name, entry.file_name)
    }
}

/// ヘッダーが見つからずスキップしたグリッド
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skipped {
    pub source: GridSource,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// 値の入ったセルがない
    Empty,
    /// 探索範囲に見出しラベルがない
    NoHeader,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Empty => write!(f, "空"),
            SkipReason::NoHeader => write!(f, "見出しなし"),
        }
    }
}

/// グリッドごとのリンク件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    pub source: GridSource,
    pub header: HeaderLocation,
    pub hyperlinks: usize,
    pub missing: usize,
}

/// 実行全体の集約
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    hyperlinks: usize,
    matched: BTreeSet<Key>,
    missing: BTreeSet<Key>,
    sheets: Vec<SheetSummary>,
    skipped: Vec<Skipped>,
}

impl Reconciliation {
    pub fn new() -> Self {
        Self::default()
    }

    /// グリッドの結果を取り込む
    pub fn absorb(&mut self, outcome: SheetOutcome) {
        self.hyperlinks += outcome.links.len();
        self.sheets.push(SheetSummary {
            source: outcome.source,
            header: outcome.header,
            hyperlinks: outcome.links.len(),
            missing: outcome.missing.len(),
        });
        self.matched.extend(outcome.matched);
        self.missing.extend(outcome.missing);
    }

    /// スキップを記録（件数には影響しない）
    pub fn skip(&mut self, source: GridSource, reason: SkipReason) {
        self.skipped.push(Skipped { source, reason });
    }

    /// 別の集約を合流させる
    pub fn merge(&mut self, other: Reconciliation) {
        self.hyperlinks += other.hyperlinks;
        self.matched.extend(other.matched);
        self.missing.extend(other.missing);
        self.sheets.extend(other.sheets);
        self.skipped.extend(other.skipped);
    }

    pub fn hyperlinks(&self) -> usize {
        self.hyperlinks
    }

    /// 全グリッドの処理後に確定させる
    ///
    /// 余分なファイル = インデックスの全キー − 参照されたキー
    pub fn finish(self, index: &FileIndex) -> ReconciliationResult {
        let extraneous = index
            .entries()
            .filter(|(key, _)| !self.matched.contains(*key))
            .map(|(_, entry)| entry.clone())
            .collect();

        ReconciliationResult {
            hyperlinks: self.hyperlinks,
            matched: self.matched,
            missing: self.missing,
            extraneous,
            sheets: self.sheets,
            skipped: self.skipped,
        }
    }
}

/// 照合の最終結果
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    pub hyperlinks: usize,
    pub matched: BTreeSet<Key>,
    pub missing: BTreeSet<Key>,
    pub extraneous: BTreeSet<FileEntry>,
    pub sheets: Vec<SheetSummary>,
    pub skipped: Vec<Skipped>,
}

impl ReconciliationResult {
    /// 差異なし
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extraneous.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{locate, DEFAULT_HEADER_LABEL};

    fn index(names: &[&str]) -> FileIndex {
        FileIndex::build(names.iter().map(|n| FileEntry::from_file_name(n))).unwrap()
    }

    fn sheet(name: &str, rows: &[&[&str]]) -> CellGrid {
        CellGrid::new(
            GridSource::Sheet { sheet: name.into() },
            (0, 0),
            rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect(),
        )
    }

    fn run(grids: &[CellGrid], index: &FileIndex) -> ReconciliationResult {
        let mut acc = Reconciliation::new();
        for grid in grids {
            match locate(grid, DEFAULT_HEADER_LABEL) {
                Some(header) => acc.absorb(reconcile(grid, header, index, "Documents", &mut Progress::none())),
                None => acc.skip(grid.source.clone(), SkipReason::NoHeader),
            }
        }
        acc.finish(index)
    }

    fn keys(set: &BTreeSet<Key>) -> Vec<&str> {
        set.iter().map(|k| k.as_str()).collect()
    }

    #[test]
    fn test_all_matched() {
        let idx = index(&["A1.pdf", "A2.pdf"]);
        let g = sheet("S", &[&["Document ID"], &["a1"], &["A2"]]);
        let result = run(&[g], &idx);

        assert_eq!(result.hyperlinks, 2);
        assert!(result.missing.is_empty());
        assert!(result.extraneous.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_missing_and_blank() {
        let idx = index(&["A1.pdf"]);
        let g = sheet("S", &[&["Document ID"], &["A1"], &["B1"], &[" "]]);
        let result = run(&[g], &idx);

        assert_eq!(result.hyperlinks, 1);
        assert_eq!(keys(&result.missing), vec!["B1"]);
        assert!(result.extraneous.is_empty());
    }

    #[test]
    fn test_hyperlink_target_and_position() {
        let idx = index(&["A1.pdf"]);
        let g = CellGrid::new(
            GridSource::Table { sheet: "S".into(), table: "Exhibits".into() },
            (3, 2),
            vec![vec!["Document ID".into()], vec!["  a1 ".into()]],
        );
        let header = locate(&g, DEFAULT_HEADER_LABEL).unwrap();
        let outcome = reconcile(&g, header, &idx, "Evidence", &mut Progress::none());

        assert_eq!(
            outcome.links,
            vec![Hyperlink {
                row: 4,
                col: 2,
                target: "Evidence/A1.pdf".into(),
                text: "  a1 ".into(),
            }]
        );
    }

    #[test]
    fn test_duplicate_references_linked_every_time() {
        let idx = index(&["A1.pdf", "Z9.pdf"]);
        let g = sheet("S", &[&["Document ID"], &["A1"], &["a1"], &["Q"], &["q "]]);
        let result = run(&[g], &idx);

        assert_eq!(result.hyperlinks, 2);
        assert_eq!(keys(&result.missing), vec!["Q"]);
        let extra: Vec<&str> = result.extraneous.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(extra, vec!["Z9.pdf"]);
    }

    #[test]
    fn test_skipped_sheet_leaves_counters() {
        let idx = index(&["A1.pdf"]);
        let g = sheet("Notes", &[&["memo"], &["A1"]]);
        let result = run(&[g], &idx);

        assert_eq!(result.hyperlinks, 0);
        assert!(result.missing.is_empty());
        assert!(result.sheets.is_empty());
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::NoHeader);
        // 参照されていないので余分扱い
        assert_eq!(result.extraneous.len(), 1);
    }

    #[test]
    fn test_extraneous_independent_of_order() {
        let idx = index(&["A.pdf", "B.pdf", "C.pdf", "D.pdf"]);
        let g1 = sheet("S1", &[&["Document ID"], &["A"], &["X"]]);
        let g2 = sheet("S2", &[&["Document ID"], &["C"], &["A"]]);

        let forward = run(&[g1.clone(), g2.clone()], &idx);
        let backward = run(&[g2, g1], &idx);

        assert_eq!(forward.extraneous, backward.extraneous);
        assert_eq!(forward.missing, backward.missing);
        assert_eq!(forward.hyperlinks, backward.hyperlinks);

        let extra: Vec<&str> = forward.extraneous.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(extra, vec!["B.pdf", "D.pdf"]);
    }

    #[test]
    fn test_merge_partial_results() {
        let idx = index(&["A.pdf", "B.pdf"]);
        let g1 = sheet("S1", &[&["Document ID"], &["A"], &["M"]]);
        let g2 = sheet("S2", &[&["Document ID"], &["M"]]);

        let mut left = Reconciliation::new();
        left.absorb(reconcile(&g1, HeaderLocation { row: 0, col: 0 }, &idx, "D", &mut Progress::none()));
        let mut right = Reconciliation::new();
        right.absorb(reconcile(&g2, HeaderLocation { row: 0, col: 0 }, &idx, "D", &mut Progress::none()));

        right.merge(left);
        let result = right.finish(&idx);
        assert_eq!(result.hyperlinks, 1);
        assert_eq!(keys(&result.missing), vec!["M"]);
        assert_eq!(result.sheets.len(), 2);
    }

    #[test]
    fn test_progress_interval() {
        let idx = index(&[]);
        let g = sheet("S", &[&["Document ID"], &["1"], &["2"], &[""], &["3"], &["4"], &["5"]]);
        let mut seen = Vec::new();
        {
            let mut progress = Progress::new(2, |n| seen.push(n));
            reconcile(&g, HeaderLocation { row: 0, col: 0 }, &idx, "D", &mut progress);
        }
        assert_eq!(seen, vec![2, 4]);
    }

    #[test]
    fn test_link_target_without_folder() {
        let entry = FileEntry::from_file_name("A1.pdf");
        assert_eq!(link_target("", &entry), "A1.pdf");
        assert_eq!(link_target("Documents", &entry), "Documents/A1.pdf");
    }
}
