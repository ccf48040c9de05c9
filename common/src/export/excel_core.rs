//! Excel生成（共通ライブラリ）
//!
//! 絞り込み結果を1シートの一覧表として出力する。
//! 画像が取得できた行はA列に埋め込み、取得できない行はプレースホルダを書く。

use crate::error::{Error, Result};
use crate::types::PartRecord;
use rust_xlsxwriter::*;

/// 出力列
pub const EXPORT_HEADERS: [&str; 7] = [
    "Image",
    "DesignID",
    "ElementID",
    "Color",
    "Element Name",
    "Category",
    "Dimensions",
];

/// 画像がない行に書く文字
pub const IMAGE_PLACEHOLDER: &str = "❌";

const SHEET_NAME: &str = "Inventory";
const IMAGE_ROW_HEIGHT: f64 = 48.0;
const COLUMN_WIDTHS: [f64; 7] = [10.0, 10.0, 12.0, 22.0, 44.0, 10.0, 12.0];

/// Excelをバッファに生成
///
/// # Arguments
/// * `rows` - 出力する部品レコード
/// * `image_loader` - 画像バイト列を取得するクロージャ (record -> Option<png bytes>)
pub fn generate_inventory_buffer<F>(rows: &[&PartRecord], image_loader: F) -> Result<Vec<u8>>
where
    F: Fn(&PartRecord) -> Option<Vec<u8>>,
{
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| Error::Export(format!("シート名設定エラー: {}", e)))?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| Error::Export(format!("列幅設定エラー: {}", e)))?;
    }

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Export(format!("ヘッダー書き込みエラー: {}", e)))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| Error::Export(format!("ウィンドウ枠固定エラー: {}", e)))?;

    for (index, record) in rows.iter().enumerate() {
        let row = index as u32 + 1;

        let image = image_loader(record).and_then(|bytes| Image::new_from_buffer(&bytes).ok());
        match image {
            Some(image) => {
                worksheet
                    .set_row_height(row, IMAGE_ROW_HEIGHT)
                    .map_err(|e| Error::Export(format!("行高さ設定エラー: {}", e)))?;
                worksheet
                    .insert_image_fit_to_cell(row, 0, &image, true)
                    .map_err(|e| Error::Export(format!("画像埋め込みエラー: {}", e)))?;
            }
            None => {
                worksheet
                    .write_string_with_format(row, 0, IMAGE_PLACEHOLDER, &value_format)
                    .map_err(|e| Error::Export(format!("値書き込みエラー: {}", e)))?;
            }
        }

        let values = [
            record.design_id(),
            record.element_id(),
            record.color().unwrap_or(""),
            record.element_name().unwrap_or(""),
            record.category().as_str(),
            record.dimensions(),
        ];
        for (offset, value) in values.iter().enumerate() {
            worksheet
                .write_string_with_format(row, offset as u16 + 1, *value, &value_format)
                .map_err(|e| Error::Export(format!("値書き込みエラー: {}", e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Export(format!("Excel保存エラー: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_inventory_buffer() {
        let records = vec![
            PartRecord::new("75192", "300121", Some("Red".into()), Some("Brick 2x4".into())),
            PartRecord::new("75192", "302101", None, Some("Plate 1x2".into())),
        ];
        let rows: Vec<&PartRecord> = records.iter().collect();
        let buffer = generate_inventory_buffer(&rows, |_| None).expect("Excel生成失敗");
        // xlsx は zip 形式
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_inventory_buffer_empty() {
        let buffer = generate_inventory_buffer(&[], |_| None).expect("空のExcel生成失敗");
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_generate_inventory_buffer_invalid_image_falls_back() {
        let records = vec![PartRecord::new("1", "2", None, None)];
        let rows: Vec<&PartRecord> = records.iter().collect();
        let result = generate_inventory_buffer(&rows, |_| Some(b"not an image".to_vec()));
        assert!(result.is_ok());
    }
}
