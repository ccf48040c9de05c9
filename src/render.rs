//! 一覧表示モジュール
//!
//! 1行1レコードの固定幅テーブルで絞り込み結果を表示する。
//! 画像が見つからない行はプレースホルダを表示する。

use parts_lookup_common::{FilterField, FilterStateStore, FilteredView, PartRecord};
use std::path::Path;

pub use parts_lookup_common::export::excel_core::IMAGE_PLACEHOLDER;

/// 画像がある行の表示
pub const IMAGE_PRESENT: &str = "🖼";

/// (見出し, 幅)
const COLUMNS: [(&str, usize); 7] = [
    ("Img", 3),
    ("DesignID", 9),
    ("ElementID", 10),
    ("Color", 20),
    ("Element Name", 40),
    ("Category", 8),
    ("Dimensions", 10),
];

/// 画像の有無を表す記号
pub fn image_marker(record: &PartRecord, images_dir: &Path) -> &'static str {
    let path = record.image_path(images_dir);
    if path.is_file() {
        IMAGE_PRESENT
    } else {
        log::debug!("image not found: {}", path.display());
        IMAGE_PLACEHOLDER
    }
}

/// 幅に収まるよう切り詰めて左寄せ
fn fit(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count > width {
        let mut truncated: String = value.chars().take(width.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    } else {
        format!("{}{}", value, " ".repeat(width - count))
    }
}

fn join_cells(values: [&str; 7]) -> String {
    values
        .iter()
        .zip(COLUMNS.iter())
        .map(|(value, (_, width))| fit(value, *width))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

pub fn format_header() -> String {
    join_cells(COLUMNS.map(|(label, _)| label))
}

pub fn format_row(record: &PartRecord, images_dir: &Path) -> String {
    join_cells([
        image_marker(record, images_dir),
        record.design_id(),
        record.element_id(),
        record.color().unwrap_or("-"),
        record.element_name().unwrap_or("-"),
        record.category().as_str(),
        record.dimensions(),
    ])
}

/// テーブル全体の文字列（空なら件数メッセージのみ）
pub fn render_table(rows: &[&PartRecord], images_dir: &Path) -> String {
    if rows.is_empty() {
        return "該当する部品はありません (0件)".to_string();
    }

    let header = format_header();
    let rule = "-".repeat(header.chars().count());
    let mut lines = vec![header, rule];
    lines.extend(rows.iter().map(|r| format_row(r, images_dir)));
    lines.push(format!("{}件", rows.len()));
    lines.join("\n")
}

/// 有効なフィルタの要約（例: `Color = "Red", Element Name ~ "plate"`）
pub fn describe_filters(store: &FilterStateStore) -> String {
    let parts: Vec<String> = store
        .iter()
        .filter_map(|(field, entry)| {
            if !entry.selected.is_empty() {
                Some(format!("{} = \"{}\"", field, entry.selected))
            } else if !entry.keyword.is_empty() {
                Some(format!("{} ~ \"{}\"", field, entry.keyword))
            } else {
                None
            }
        })
        .collect();

    if parts.is_empty() {
        "フィルタなし".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn print_view(view: &FilteredView<'_>, store: &FilterStateStore, images_dir: &Path) {
    println!("🔍 {}", describe_filters(store));
    println!("{}\n", render_table(&view.rows, images_dir));
}

/// 選択肢の一覧表示
pub fn render_options(field: FilterField, options: &[String]) -> String {
    if options.is_empty() {
        return format!("{}: 選択肢なし", field);
    }
    let mut lines = vec![format!("{} ({}件):", field, options.len())];
    lines.extend(options.iter().map(|o| format!("  {}", o)));
    lines.join("\n")
}
