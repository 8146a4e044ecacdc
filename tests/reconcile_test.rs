//! 照合処理の統合テスト
//!
//! メモリ上の台帳ストアを使い、検出〜照合〜差異リストの流れを検証

use doclink_common::{CellGrid, Errata, FileEntry, FileIndex, GridSource, Hyperlink, SkipReason};
use doclink_rust::error::{DocLinkError, Result};
use doclink_rust::run::reconcile_store;
use doclink_rust::workbook::SheetStore;
use std::collections::HashMap;
use std::path::PathBuf;

/// テスト用のメモリ上ストア
#[derive(Default)]
struct MemoryStore {
    grids: Vec<CellGrid>,
    links: HashMap<String, Vec<Hyperlink>>,
}

impl MemoryStore {
    fn with_sheet(mut self, name: &str, rows: &[&[&str]]) -> Self {
        self.grids.push(CellGrid::new(
            GridSource::Sheet { sheet: name.into() },
            (0, 0),
            rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect(),
        ));
        self
    }

    fn links_on(&self, sheet: &str) -> Vec<&Hyperlink> {
        self.links.get(sheet).map(|v| v.iter().collect()).unwrap_or_default()
    }
}

impl SheetStore for MemoryStore {
    fn grids(&mut self) -> Result<Vec<CellGrid>> {
        Ok(self.grids.clone())
    }

    fn set_hyperlink(&mut self, sheet: &str, link: &Hyperlink) -> Result<()> {
        self.links.entry(sheet.to_string()).or_default().push(link.clone());
        Ok(())
    }

    fn save(&mut self) -> Result<PathBuf> {
        Ok(PathBuf::from("memory.xlsx"))
    }
}

fn index(names: &[&str]) -> FileIndex {
    FileIndex::build(names.iter().map(|n| FileEntry::from_file_name(n))).expect("インデックス構築失敗")
}

/// シナリオA: 大文字小文字違いも含めて全件一致
#[test]
fn test_scenario_a_all_linked() {
    let idx = index(&["A1.pdf", "A2.pdf"]);
    let mut store = MemoryStore::default().with_sheet("Index", &[&["Document ID"], &["a1"], &["A2"]]);

    let result = reconcile_store(&mut store, &idx, "Documents", "Document ID", 0).unwrap();

    assert_eq!(result.hyperlinks, 2);
    assert!(result.missing.is_empty());
    assert!(result.extraneous.is_empty());
    assert!(Errata::from_result(&result).is_none());

    let targets: Vec<&str> = store.links_on("Index").iter().map(|l| l.target.as_str()).collect();
    assert_eq!(targets, vec!["Documents/A1.pdf", "Documents/A2.pdf"]);
}

/// シナリオB: 欠落1件、空白行は無視
#[test]
fn test_scenario_b_missing_and_blank() {
    let idx = index(&["A1.pdf"]);
    let mut store = MemoryStore::default().with_sheet("Index", &[&["Document ID"], &["A1"], &["B1"], &[" "]]);

    let result = reconcile_store(&mut store, &idx, "Documents", "Document ID", 0).unwrap();

    assert_eq!(result.hyperlinks, 1);
    let missing: Vec<&str> = result.missing.iter().map(|k| k.as_str()).collect();
    assert_eq!(missing, vec!["B1"]);
    assert!(result.extraneous.is_empty());

    let errata = Errata::from_result(&result).expect("差異リストがあるはず");
    assert_eq!(errata.missing, vec!["B1"]);
    assert!(errata.extraneous.is_empty());
}

/// シナリオC: 基底名が同じファイルは構築時点で失敗
#[test]
fn test_scenario_c_duplicate_key() {
    let result = FileIndex::build(vec![
        FileEntry::from_file_name("A1.pdf"),
        FileEntry::from_file_name("A1.PDF"),
    ]);
    let err: DocLinkError = result.unwrap_err().into();
    assert!(matches!(
        err,
        DocLinkError::Common(doclink_common::Error::DuplicateKey { .. })
    ));
}

/// シナリオD: 見出しのないシートはスキップ
#[test]
fn test_scenario_d_no_header_skipped() {
    let idx = index(&["A1.pdf"]);
    let mut store = MemoryStore::default()
        .with_sheet("Notes", &[&["memo"], &["x"], &["y"], &["Document ID"], &["A1"]])
        .with_sheet("Index", &[&["Document ID"], &["A1"]]);

    let result = reconcile_store(&mut store, &idx, "Documents", "Document ID", 0).unwrap();

    assert_eq!(result.hyperlinks, 1);
    assert!(result.missing.is_empty());
    assert_eq!(result.sheets.len(), 1);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason, SkipReason::NoHeader);
    assert!(store.links_on("Notes").is_empty());
}

/// 空シートはスキップ扱い
#[test]
fn test_empty_sheet_skipped() {
    let idx = index(&["A1.pdf"]);
    let mut store = MemoryStore::default().with_sheet("Blank", &[]);

    let result = reconcile_store(&mut store, &idx, "Documents", "Document ID", 0).unwrap();

    assert_eq!(result.hyperlinks, 0);
    assert_eq!(result.skipped[0].reason, SkipReason::Empty);
    // どこからも参照されていない
    assert_eq!(result.extraneous.len(), 1);
}

/// 複数シートにまたがる参照と余分なファイル
#[test]
fn test_multi_sheet_extraneous() {
    let idx = index(&["A1.pdf", "A2.pdf", "A3.docx", "A4.msg"]);
    let mut store = MemoryStore::default()
        .with_sheet("Vol1", &[&["Exhibit list"], &["No", "Document ID"], &["1", "A1"], &["2", "X1"]])
        .with_sheet("Vol2", &[&["Document ID (legacy)"], &["a1"], &["A3 "], &["x1"]]);

    let result = reconcile_store(&mut store, &idx, "Evidence", "Document ID", 0).unwrap();

    assert_eq!(result.hyperlinks, 3);
    let missing: Vec<&str> = result.missing.iter().map(|k| k.as_str()).collect();
    assert_eq!(missing, vec!["X1"]);
    let extra: Vec<&str> = result.extraneous.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(extra, vec!["A2.pdf", "A4.msg"]);

    // 見出しが2行目B列にずれていてもその下の行にリンクする
    let vol1 = store.links_on("Vol1");
    assert_eq!(vol1.len(), 1);
    assert_eq!((vol1[0].row, vol1[0].col), (2, 1));
}

/// カスタム見出しラベル
#[test]
fn test_custom_label() {
    let idx = index(&["P-001.pdf"]);
    let mut store = MemoryStore::default().with_sheet("Index", &[&["Bates No.", "Document ID"], &["p-001", "zzz"]]);

    let result = reconcile_store(&mut store, &idx, "Production", "Bates No", 0).unwrap();

    assert_eq!(result.hyperlinks, 1);
    assert!(result.missing.is_empty());
    assert_eq!(store.links_on("Index")[0].target, "Production/P-001.pdf");
}
