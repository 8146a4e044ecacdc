use super::reader::{self, SheetData};
use super::writer;
use super::SheetStore;
use crate::error::{DocLinkError, Result};
use doclink_common::{CellGrid, Hyperlink};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// .xlsx ファイルの台帳
///
/// 開いた時点で全シートをメモリに読み込む。保存時は値を書き戻してリンクを付ける。
pub struct XlsxStore {
    output: PathBuf,
    sheets: Vec<SheetData>,
    grids: Vec<CellGrid>,
    links: HashMap<String, Vec<Hyperlink>>,
}

impl XlsxStore {
    /// 台帳を開く
    ///
    /// # Arguments
    /// * `path` - 台帳ファイル
    /// * `output` - 保存先（None なら上書き）
    pub fn open(path: &Path, output: Option<&Path>) -> Result<Self> {
        let loaded = reader::load(path)?;
        debug!(
            sheets = loaded.sheets.len(),
            grids = loaded.grids.len(),
            "台帳を読み込み"
        );

        Ok(Self {
            output: output.unwrap_or(path).to_path_buf(),
            sheets: loaded.sheets,
            grids: loaded.grids,
            links: HashMap::new(),
        })
    }

}

impl SheetStore for XlsxStore {
    fn grids(&mut self) -> Result<Vec<CellGrid>> {
        Ok(std::mem::take(&mut self.grids))
    }

    fn set_hyperlink(&mut self, sheet: &str, link: &Hyperlink) -> Result<()> {
        if !self.sheets.iter().any(|s| s.name == sheet) {
            return Err(DocLinkError::WorkbookWrite(format!("シートがありません: {}", sheet)));
        }
        self.links
            .entry(sheet.to_string())
            .or_default()
            .push(link.clone());
        Ok(())
    }

    fn save(&mut self) -> Result<PathBuf> {
        writer::write_workbook(&self.output, &self.sheets, &self.links)?;
        Ok(self.output.clone())
    }
}
