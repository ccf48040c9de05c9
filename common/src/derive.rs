//! 派生属性モジュール
//!
//! 部品名（Element Name）からカテゴリと寸法トークンを導出する。
//! どちらも部品名の純関数で、手動で上書きする経路はない。

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 部品カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Category {
    Brick,
    Plate,
    Tile,
    Slope,
    Technic,
    #[default]
    Other,
}

/// キーワード→カテゴリの判定順（先勝ち）
const CATEGORY_RULES: &[(&str, Category)] = &[
    ("brick", Category::Brick),
    ("plate", Category::Plate),
    ("tile", Category::Tile),
    ("slope", Category::Slope),
    ("technic", Category::Technic),
];

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Brick,
        Category::Plate,
        Category::Tile,
        Category::Slope,
        Category::Technic,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Brick => "Brick",
            Category::Plate => "Plate",
            Category::Tile => "Tile",
            Category::Slope => "Slope",
            Category::Technic => "Technic",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// 部品名からカテゴリを判定
pub fn categorize(name: &str) -> Category {
    let name = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

/// 部品名から最初の寸法トークン（例: "2x4", "6 X 10"）を抽出
///
/// 数値の妥当性は検証しない。見つからなければ空文字。
pub fn extract_dimensions(name: &str) -> String {
    lazy_static::lazy_static! {
        static ref DIMENSION_RE: Regex = Regex::new(r"\d+\s?[xX]\s?\d+").unwrap();
    }

    DIMENSION_RE
        .find(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
