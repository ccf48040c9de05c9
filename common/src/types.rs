//! 在庫データの型定義
//!
//! - PartRecord: スプレッドシート1行分の部品情報（派生列を含む）
//! - Dataset: 読み込み済みの部品一覧（読み取り専用）

use crate::derive::{categorize, extract_dimensions, Category};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 部品レコード
///
/// `category` と `dimensions` は `element_name` から導出される。
/// 外部から書き換えられないようフィールドは非公開。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartRecord {
    #[serde(rename = "DesignID")]
    design_id: String,

    #[serde(rename = "ElementID")]
    element_id: String,

    #[serde(rename = "Color")]
    color: Option<String>,

    #[serde(rename = "Element Name")]
    element_name: Option<String>,

    #[serde(rename = "Category")]
    category: Category,

    #[serde(rename = "Dimensions")]
    dimensions: String,
}

impl PartRecord {
    pub fn new(
        design_id: impl Into<String>,
        element_id: impl Into<String>,
        color: Option<String>,
        element_name: Option<String>,
    ) -> Self {
        let name = element_name.as_deref().unwrap_or("");
        let category = categorize(name);
        let dimensions = extract_dimensions(name);

        Self {
            design_id: design_id.into(),
            element_id: element_id.into(),
            color,
            element_name,
            category,
            dimensions,
        }
    }

    pub fn design_id(&self) -> &str {
        &self.design_id
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn element_name(&self) -> Option<&str> {
        self.element_name.as_deref()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn dimensions(&self) -> &str {
        &self.dimensions
    }

    /// 画像ファイル名: `{DesignID}_{ElementID}.png`
    pub fn image_file_name(&self) -> String {
        format!("{}_{}.png", self.design_id, self.element_id)
    }

    pub fn image_path(&self, images_dir: &Path) -> PathBuf {
        images_dir.join(self.image_file_name())
    }
}

/// 読み込み済みデータセット
///
/// 読み込み後は不変。行順はソースの順序を保持する。
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PartRecord>,
    source: Option<PathBuf>,
    sheet: Option<String>,
}

impl Dataset {
    pub fn from_records(records: Vec<PartRecord>) -> Self {
        Self {
            records,
            source: None,
            sheet: None,
        }
    }

    pub fn with_source(mut self, source: &Path, sheet: &str) -> Self {
        self.source = Some(source.to_path_buf());
        self.sheet = Some(sheet.to_string());
        self
    }

    pub fn records(&self) -> &[PartRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PartRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }
}
