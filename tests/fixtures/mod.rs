//! テスト用スプレッドシートの生成

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::Path;

pub type Row = (f64, f64, Option<&'static str>, Option<&'static str>);

pub const HEADERS: [&str; 4] = ["DesignID", "ElementID", "Color", "Element Name"];

/// (DesignID, ElementID, Color, Element Name)
pub const FALCON_ROWS: &[Row] = &[
    (75192.0, 300121.0, Some("Red"), Some("Brick 2x4")),
    (75192.0, 302101.0, Some("Light Bluish Gray"), Some("Plate 1x2")),
    (75192.0, 4211065.0, Some("Dark Red"), Some("Tile 1 x 2 Grille")),
    (75192.0, 6092585.0, Some("Red"), Some("Technic Pin")),
    (75192.0, 4558884.0, None, Some("Bracket 1x2 - 2x2")),
    (75192.0, 9999999.0, Some("Black"), None),
    (75192.0, 6173127.0, Some("Brown"), Some("Slope 45 2x1")),
    (75192.0, 4243806.0, Some("Light Bluish Gray"), Some("Plate 6 X 10")),
];

fn write_rows(workbook: &mut Workbook, sheet: &str, headers: &[&str], rows: &[Row]) {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("シート名設定失敗");
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).expect("ヘッダー書き込み失敗");
    }
    for (index, (design_id, element_id, color, name)) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_number(row, 0, *design_id).expect("書き込み失敗");
        worksheet.write_number(row, 1, *element_id).expect("書き込み失敗");
        if let Some(color) = color {
            worksheet.write_string(row, 2, *color).expect("書き込み失敗");
        }
        if let Some(name) = name {
            worksheet.write_string(row, 3, *name).expect("書き込み失敗");
        }
    }
}

/// 1シート "Parts" の在庫ファイルを作成
pub fn write_inventory(path: &Path, rows: &[Row]) {
    let mut workbook = Workbook::new();
    write_rows(&mut workbook, "Parts", &HEADERS, rows);
    workbook.save(path).expect("xlsx保存失敗");
}

/// ヘッダーを指定して作成
pub fn write_inventory_with_headers(path: &Path, headers: &[&str], rows: &[Row]) {
    let mut workbook = Workbook::new();
    write_rows(&mut workbook, "Parts", headers, rows);
    workbook.save(path).expect("xlsx保存失敗");
}

/// 先頭に部品表ではないシート "Summary" を置いた在庫ファイル
pub fn write_inventory_with_summary(path: &Path, rows: &[Row]) {
    let mut workbook = Workbook::new();
    write_rows(&mut workbook, "Summary", &["Set", "Pieces"], &[]);
    write_rows(&mut workbook, "Parts", &HEADERS, rows);
    workbook.save(path).expect("xlsx保存失敗");
}
