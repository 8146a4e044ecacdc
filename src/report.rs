//! 差異リストの出力

use crate::error::Result;
use chrono::{DateTime, Local};
use doclink_common::Errata;
use std::path::{Path, PathBuf};

/// 差異リストのファイル名（実行日時付き）
pub fn errata_file_name(now: &DateTime<Local>) -> String {
    format!("errata_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// 差異リストを書き出してパスを返す
pub fn write_errata(dir: &Path, errata: &Errata, now: &DateTime<Local>) -> Result<PathBuf> {
    let path = dir.join(errata_file_name(now));
    let body = errata.render(&now.format("%Y-%m-%d %H:%M:%S").to_string());
    std::fs::write(&path, body)?;
    Ok(path)
}
