mod candidates;

pub use candidates::{discover, Candidates, Overrides};

use crate::error::{DocLinkError, Result};
use doclink_common::FileEntry;
use std::path::Path;
use walkdir::WalkDir;

/// 隠しファイル・Officeのロックファイル（~$）は対象外
pub(crate) fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with("~$")
}

/// ドキュメントフォルダ直下のファイル一覧
pub fn scan_documents(folder: &Path) -> Result<Vec<FileEntry>> {
    if !folder.is_dir() {
        return Err(DocLinkError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.path().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        if is_ignored_name(&file_name) {
            continue;
        }

        files.push(FileEntry::from_file_name(&file_name));
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}
