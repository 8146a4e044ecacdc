//! Document Link Common Library
//!
//! 台帳のドキュメントIDとフォルダ内ファイルの照合ロジック。
//! ファイルシステムやExcelには触れず、CLI側から渡されたデータだけを扱う。

pub mod normalizer;
pub mod file_index;
pub mod grid;
pub mod header;
pub mod engine;
pub mod errata;
pub mod error;

pub use normalizer::{normalize, Key};
pub use file_index::{FileEntry, FileIndex};
pub use grid::{CellGrid, GridSource, SHEET_HEADER_ROWS, TABLE_HEADER_ROWS};
pub use header::{label_matches, locate, HeaderLocation, DEFAULT_HEADER_LABEL};
pub use engine::{
    reconcile, Hyperlink, Progress, Reconciliation, ReconciliationResult, SheetOutcome,
    SheetSummary, SkipReason, Skipped,
};
pub use errata::Errata;
pub use error::{Error, Result};
