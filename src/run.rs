//! 照合の一括実行
//!
//! 検出 → ファイル一覧 → 照合 → 差異リスト・保存 を1本の流れで行う。
//! 台帳・フォルダの数やIDの重複といった前提エラーは、台帳を開く前に止める。

use crate::error::Result;
use crate::report;
use crate::scanner::{self, Candidates, Overrides};
use crate::workbook::{SheetStore, StoreGuard, XlsxStore};
use chrono::Local;
use doclink_common::{
    header, reconcile, Errata, FileIndex, HeaderLocation, Progress, Reconciliation,
    ReconciliationResult, SkipReason,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 保存の有無
#[derive(Debug, Clone)]
pub enum RunMode {
    /// リンクを書き込んで保存（output が None なら上書き）
    Link { output: Option<PathBuf> },
    /// 照合と差異リストのみ
    Check,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root: PathBuf,
    pub overrides: Overrides,
    pub header_label: String,
    pub progress_interval: usize,
    pub mode: RunMode,
}

/// 実行結果
#[derive(Debug)]
pub struct RunSummary {
    pub candidates: Candidates,
    pub result: ReconciliationResult,
    /// 差異があった場合のみ
    pub errata_path: Option<PathBuf>,
    /// Check では None
    pub saved_to: Option<PathBuf>,
}

pub fn execute(options: &RunOptions) -> Result<RunSummary> {
    // 1. 台帳・フォルダ検出
    println!("[1/4] 台帳とドキュメントフォルダを検出中...");
    let candidates = scanner::discover(&options.root, &options.overrides)?;
    println!("✔ 台帳: {}", candidates.workbook.display());
    println!("✔ フォルダ: {}\n", candidates.folder.display());

    // 2. ファイル一覧
    println!("[2/4] ファイル一覧を作成中...");
    let files = scanner::scan_documents(&candidates.folder)?;
    let index = FileIndex::build(files)?;
    println!("✔ {}件のファイルを検出\n", index.len());
    info!(files = index.len(), folder = %candidates.folder.display(), "ファイルインデックスを構築");

    // 3. 照合
    println!("[3/4] 照合中... (見出し: \"{}\")", options.header_label);
    let mut guard = match &options.mode {
        RunMode::Link { output } => {
            StoreGuard::new(XlsxStore::open(&candidates.workbook, output.as_deref())?)
        }
        RunMode::Check => StoreGuard::read_only(XlsxStore::open(&candidates.workbook, None)?),
    };
    let result = reconcile_store(
        guard.store(),
        &index,
        &candidates.folder_name(),
        &options.header_label,
        options.progress_interval,
    )?;
    println!("✔ 照合完了\n");

    // 4. 差異リスト・保存
    println!("[4/4] 結果を保存中...");
    let errata_path = match Errata::from_result(&result) {
        Some(errata) => {
            let dir = errata_dir(&candidates.workbook);
            Some(report::write_errata(&dir, &errata, &Local::now())?)
        }
        None => None,
    };

    let saved_to = match &options.mode {
        RunMode::Link { .. } => Some(guard.commit()?),
        RunMode::Check => {
            guard.discard();
            None
        }
    };

    Ok(RunSummary {
        candidates,
        result,
        errata_path,
        saved_to,
    })
}

/// 台帳の全グリッドを照合し、リンクをストアに書き込む
pub fn reconcile_store<S: SheetStore>(
    store: &mut S,
    index: &FileIndex,
    folder_name: &str,
    header_label: &str,
    progress_interval: usize,
) -> Result<ReconciliationResult> {
    let mut acc = Reconciliation::new();

    for grid in store.grids()? {
        if grid.is_empty() {
            println!("- {}: 空（スキップ）", grid.source);
            acc.skip(grid.source, SkipReason::Empty);
            continue;
        }

        let Some(location) = header::locate(&grid, header_label) else {
            println!("- {}: 見出しなし（スキップ）", grid.source);
            acc.skip(grid.source, SkipReason::NoHeader);
            continue;
        };
        debug!(source = %grid.source, row = location.row, col = location.col, "見出しを検出");

        let mut progress = Progress::new(progress_interval, |n| println!("  {}行処理...", n));
        let outcome = reconcile(&grid, location, index, folder_name, &mut progress);

        for link in &outcome.links {
            store.set_hyperlink(grid.source.sheet(), link)?;
        }

        println!(
            "- {}: 見出し {}、リンク {}件、欠落 {}件",
            grid.source,
            cell_ref(location),
            outcome.links.len(),
            outcome.missing.len()
        );
        acc.absorb(outcome);
    }

    Ok(acc.finish(index))
}

/// A1 形式のセル参照
pub fn cell_ref(location: HeaderLocation) -> String {
    let mut letters = Vec::new();
    let mut n = location.col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    let column: String = letters.into_iter().rev().collect();
    format!("{}{}", column, location.row + 1)
}

/// 差異リストは台帳と同じフォルダに置く
fn errata_dir(workbook: &Path) -> PathBuf {
    match workbook.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ref() {
        assert_eq!(cell_ref(HeaderLocation { row: 0, col: 0 }), "A1");
        assert_eq!(cell_ref(HeaderLocation { row: 2, col: 25 }), "Z3");
        assert_eq!(cell_ref(HeaderLocation { row: 9, col: 26 }), "AA10");
        assert_eq!(cell_ref(HeaderLocation { row: 0, col: 701 }), "ZZ1");
        assert_eq!(cell_ref(HeaderLocation { row: 0, col: 702 }), "AAA1");
    }

    #[test]
    fn test_errata_dir() {
        assert_eq!(errata_dir(Path::new("Index.xlsx")), PathBuf::from("."));
        assert_eq!(errata_dir(Path::new("case/Index.xlsx")), PathBuf::from("case"));
    }
}
