use crate::cli::ExportFormat;
use crate::error::Result;
use parts_lookup_common::export::excel_core;
use parts_lookup_common::PartRecord;
use std::path::{Path, PathBuf};

/// タイムスタンプ付きの既定ファイル名
pub fn default_file_name(extension: &str) -> String {
    format!(
        "inventory_{}.{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        extension
    )
}

/// ディレクトリ（または拡張子なし）ならその中に既定名で出力
pub fn output_path_for_format(output: &Path, format: &ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_file_name(format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// 絞り込み結果を出力し、書き込んだパスを返す
pub fn export_rows(
    rows: &[&PartRecord],
    format: &ExportFormat,
    output: &Path,
    images_dir: &Path,
) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, format);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Excel => {
            println!("- Excelを生成中... ({}件)", rows.len());
            let buffer = excel_core::generate_inventory_buffer(rows, |record| {
                std::fs::read(record.image_path(images_dir)).ok()
            })?;
            std::fs::write(&output_path, buffer)?;
        }
        ExportFormat::Json => {
            println!("- JSONを生成中... ({}件)", rows.len());
            let json = serde_json::to_string_pretty(rows)?;
            std::fs::write(&output_path, json)?;
        }
    }

    log::info!("exported {} rows to {}", rows.len(), output_path.display());
    println!("✔ {}出力: {}", format, output_path.display());
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_file_name() {
        let name = default_file_name("xlsx");
        assert!(name.starts_with("inventory_"));
        assert!(name.ends_with(".xlsx"));
        // inventory_YYYYMMDD_HHMMSS.xlsx
        assert_eq!(name.len(), "inventory_".len() + 15 + ".xlsx".len());
    }

    #[test]
    fn test_output_path_for_dir() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = output_path_for_format(dir.path(), &ExportFormat::Json);
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for_format(Path::new("out/parts.xlsx"), &ExportFormat::Excel);
        assert_eq!(path, PathBuf::from("out/parts.xlsx"));
    }
}
