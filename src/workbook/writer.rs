//! 台帳の保存（rust_xlsxwriter）
//!
//! 読み込んだセル値・数式・テーブルをシート順に書き戻し、
//! ハイパーリンクを付けたセルはリンクとして書く。書式は引き継がない。

use super::reader::{display_text, SheetData, TableDef};
use crate::error::{DocLinkError, Result};
use calamine::Data;
use doclink_common::Hyperlink;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use rust_xlsxwriter::{
    ColNum, Formula, RowNum, Table, TableColumn, Url, Workbook, Worksheet, XlsxError,
};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// URLのパス部分でエスケープする文字（`#` はリンク先の場所指定と解釈されるため必須）
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// 相対パスをExcelのファイルリンクに変換
pub fn file_url(target: &str) -> String {
    let path = target.replace('\\', "/");
    format!("file:///{}", utf8_percent_encode(&path, PATH_ESCAPE))
}

pub fn write_workbook(
    path: &Path,
    sheets: &[SheetData],
    links: &HashMap<String, Vec<Hyperlink>>,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let no_links = Vec::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        let sheet_links = links.get(&sheet.name).unwrap_or(&no_links);
        write_sheet(worksheet, sheet, sheet_links)
            .map_err(|e| DocLinkError::WorkbookWrite(format!("{}: {}", sheet.name, e)))?;
    }

    workbook
        .save(path)
        .map_err(|e| DocLinkError::WorkbookWrite(format!("{}: {}", path.display(), e)))?;

    Ok(())
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &SheetData,
    links: &[Hyperlink],
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(&sheet.name)?;

    let linked: HashSet<(u32, u32)> = links.iter().map(|l| (l.row, l.col)).collect();

    if let Some((row0, col0)) = sheet.range.start() {
        for (r, c, cell) in sheet.range.used_cells() {
            let row = row0 + r as u32;
            let col = col0 + c as u32;
            if linked.contains(&(row, col)) {
                continue;
            }
            write_cell(worksheet, row as RowNum, col as ColNum, cell)?;
        }
    }

    if let Some((row0, col0)) = sheet.formulas.start() {
        for (r, c, formula) in sheet.formulas.used_cells() {
            let row = row0 + r as u32;
            let col = col0 + c as u32;
            if linked.contains(&(row, col)) {
                continue;
            }
            let cached = sheet
                .range
                .get_value((row, col))
                .map(display_text)
                .unwrap_or_default();
            worksheet.write_formula(
                row as RowNum,
                col as ColNum,
                Formula::new(formula).set_result(cached),
            )?;
        }
    }

    for table in &sheet.tables {
        write_table(worksheet, table)?;
    }

    for link in links {
        worksheet.write_url_with_text(
            link.row as RowNum,
            link.col as ColNum,
            Url::new(file_url(&link.target)),
            &link.text,
        )?;
    }

    Ok(())
}

/// テーブルを同じ範囲・名前・列見出しで作り直す
fn write_table(worksheet: &mut Worksheet, def: &TableDef) -> std::result::Result<(), XlsxError> {
    let columns: Vec<TableColumn> = def
        .columns
        .iter()
        .map(|header| TableColumn::new().set_header(header))
        .collect();
    let table = Table::new().set_name(&def.name).set_columns(&columns);

    worksheet.add_table(
        def.first_row as RowNum,
        def.first_col as ColNum,
        def.last_row as RowNum,
        def.last_col as ColNum,
        &table,
    )?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &Data,
) -> std::result::Result<(), XlsxError> {
    match cell {
        Data::Empty => {}
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Data::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        Data::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        Data::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Data::DateTime(dt) => {
            worksheet.write_number(row, col, dt.as_f64())?;
        }
        // エラー値（#N/A 等）は表示テキストで残す
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}
