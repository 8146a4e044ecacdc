//! 台帳・ドキュメントフォルダの自動検出
//!
//! 作業フォルダ直下に .xlsx がちょうど1つ、サブフォルダがちょうど1つあることを前提にする。
//! 0個・複数個は曖昧なので、台帳を開く前にエラーで止める。

use super::is_ignored_name;
use crate::error::{DocLinkError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "XLSX"];

/// 明示指定（指定があれば自動検出しない）
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub workbook: Option<PathBuf>,
    pub folder: Option<PathBuf>,
}

/// 照合対象
#[derive(Debug, Clone)]
pub struct Candidates {
    pub workbook: PathBuf,
    pub folder: PathBuf,
}

impl Candidates {
    /// ハイパーリンクのパスに使うフォルダ名
    pub fn folder_name(&self) -> String {
        self.folder
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

pub fn discover(root: &Path, overrides: &Overrides) -> Result<Candidates> {
    if !root.is_dir() {
        return Err(DocLinkError::FolderNotFound(root.display().to_string()));
    }

    let workbook = match &overrides.workbook {
        Some(path) => {
            if !path.is_file() {
                return Err(DocLinkError::FileNotFound(path.display().to_string()));
            }
            path.clone()
        }
        None => single_workbook(root)?,
    };

    let folder = match &overrides.folder {
        Some(path) => {
            if !path.is_dir() {
                return Err(DocLinkError::FolderNotFound(path.display().to_string()));
            }
            path.clone()
        }
        None => single_folder(root)?,
    };

    Ok(Candidates { workbook, folder })
}

fn list_children(root: &Path) -> Vec<walkdir::DirEntry> {
    let mut entries: Vec<_> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !is_ignored_name(&e.file_name().to_string_lossy()))
        .collect();
    entries.sort_by(|a, b| a.file_name().cmp(b.file_name()));
    entries
}

fn single_workbook(root: &Path) -> Result<PathBuf> {
    let mut found: Vec<PathBuf> = list_children(root)
        .into_iter()
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| WORKBOOK_EXTENSIONS.iter().any(|&x| x == ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    match found.len() {
        0 => Err(DocLinkError::NoWorkbook(root.display().to_string())),
        1 => Ok(found.remove(0)),
        _ => Err(DocLinkError::MultipleWorkbooks(display_names(&found))),
    }
}

fn single_folder(root: &Path) -> Result<PathBuf> {
    let mut found: Vec<PathBuf> = list_children(root)
        .into_iter()
        .filter(|e| e.path().is_dir())
        .map(|e| e.into_path())
        .collect();

    match found.len() {
        0 => Err(DocLinkError::NoDocumentFolder(root.display().to_string())),
        1 => Ok(found.remove(0)),
        _ => Err(DocLinkError::MultipleDocumentFolders(display_names(&found))),
    }
}

fn display_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect()
}
