//! スプレッドシート読み込みモジュール
//!
//! calamine で xlsx/xls/xlsb/ods を読み込み、派生列付きの Dataset を作る。
//! 必須列が欠けている場合は部分的なデータを返さずにエラーにする。

use crate::error::{Error, Result};
use crate::types::{Dataset, PartRecord};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 必須列
pub const REQUIRED_COLUMNS: [&str; 4] = ["DesignID", "ElementID", "Color", "Element Name"];

/// 必須列の位置
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    design_id: usize,
    element_id: usize,
    color: usize,
    element_name: usize,
}

impl ColumnMap {
    fn from_header(header: &[Data]) -> Result<Self> {
        let names: Vec<String> = header
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default().trim().to_string())
            .collect();

        let mut positions = [0usize; 4];
        let mut missing = Vec::new();
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            match names.iter().position(|n| n == name) {
                Some(index) => *slot = index,
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }

        let [design_id, element_id, color, element_name] = positions;
        Ok(Self {
            design_id,
            element_id,
            color,
            element_name,
        })
    }
}

/// スプレッドシートを読み込む
///
/// # Arguments
/// * `path` - 入力ファイル
/// * `sheet` - シート名（省略時は先頭シート）
pub fn load_dataset(path: &Path, sheet: Option<&str>) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| Error::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|n| n.as_str() == name)
            .cloned()
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| Error::Spreadsheet(format!("{}: ワークシートがありません", path.display())))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Spreadsheet(format!("{} [{}]: {}", path.display(), sheet_name, e)))?;

    let records = records_from_rows(range.rows())?;
    log::debug!(
        "loaded {} rows from {} [{}]",
        records.len(),
        path.display(),
        sheet_name
    );

    Ok(Dataset::from_records(records).with_source(path, &sheet_name))
}

/// ヘッダー行 + データ行からレコードを作る
pub fn records_from_rows<'a, I>(mut rows: I) -> Result<Vec<PartRecord>>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows.next().ok_or(Error::EmptySheet)?;
    let columns = ColumnMap::from_header(header)?;

    let records = rows
        .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
        .map(|row| {
            let get = |index: usize| row.get(index).and_then(cell_text);
            PartRecord::new(
                get(columns.design_id).unwrap_or_default(),
                get(columns.element_id).unwrap_or_default(),
                get(columns.color),
                get(columns.element_name),
            )
        })
        .collect();

    Ok(records)
}

/// セル値を文字列に変換（空セル・エラーセルは None）
///
/// 整数値の浮動小数点セルは小数部なしで表示する（75192.0 → "75192"）。
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Category;

    fn header() -> Vec<Data> {
        vec![
            Data::String("DesignID".into()),
            Data::String("ElementID".into()),
            Data::String("Color".into()),
            Data::String("Element Name".into()),
        ]
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(cell_text(&Data::String("Red".into())), Some("Red".to_string()));
        assert_eq!(cell_text(&Data::Float(75192.0)), Some("75192".to_string()));
        assert_eq!(cell_text(&Data::Float(1.5)), Some("1.5".to_string()));
        assert_eq!(cell_text(&Data::Int(4211065)), Some("4211065".to_string()));
    }

    #[test]
    fn test_records_from_rows() {
        let rows = vec![
            header(),
            vec![
                Data::Float(75192.0),
                Data::Float(300121.0),
                Data::String("Red".into()),
                Data::String("Brick 2x4".into()),
            ],
            vec![
                Data::Float(75192.0),
                Data::Float(302101.0),
                Data::Empty,
                Data::String("Plate 6 X 10".into()),
            ],
        ];
        let records = records_from_rows(rows.iter().map(|r| r.as_slice())).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].design_id(), "75192");
        assert_eq!(records[0].category(), Category::Brick);
        assert_eq!(records[1].color(), None);
        assert_eq!(records[1].dimensions(), "6 X 10");
    }

    #[test]
    fn test_records_from_rows_column_order_and_extra_columns() {
        let rows = vec![
            vec![
                Data::String("Element Name".into()),
                Data::String("Qty".into()),
                Data::String("Color".into()),
                Data::String("ElementID".into()),
                Data::String("DesignID".into()),
            ],
            vec![
                Data::String("Slope 45 2x1".into()),
                Data::Float(4.0),
                Data::String("Brown".into()),
                Data::Float(6173127.0),
                Data::Float(3040.0),
            ],
        ];
        let records = records_from_rows(rows.iter().map(|r| r.as_slice())).unwrap();
        assert_eq!(records[0].element_id(), "6173127");
        assert_eq!(records[0].design_id(), "3040");
        assert_eq!(records[0].category(), Category::Slope);
    }

    #[test]
    fn test_records_from_rows_skips_blank_rows() {
        let rows = vec![
            header(),
            vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty],
            vec![
                Data::Float(1.0),
                Data::Float(2.0),
                Data::String("Black".into()),
                Data::Empty,
            ],
        ];
        let records = records_from_rows(rows.iter().map(|r| r.as_slice())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].element_name(), None);
        assert_eq!(records[0].category(), Category::Other);
    }

    #[test]
    fn test_records_from_rows_missing_columns() {
        let rows = vec![vec![
            Data::String("DesignID".into()),
            Data::String("Colour".into()),
        ]];
        let err = records_from_rows(rows.iter().map(|r| r.as_slice())).unwrap_err();
        match err {
            Error::MissingColumns(cols) => {
                assert_eq!(cols, vec!["ElementID", "Color", "Element Name"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_records_from_rows_empty() {
        let rows: Vec<Vec<Data>> = Vec::new();
        let err = records_from_rows(rows.iter().map(|r| r.as_slice())).unwrap_err();
        assert!(matches!(err, Error::EmptySheet));
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let result = load_dataset(Path::new("/nonexistent/inventory.xlsx"), None);
        assert!(matches!(result, Err(Error::Spreadsheet(_))));
    }
}
