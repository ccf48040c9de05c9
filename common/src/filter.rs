//! ハイブリッドフィルタモジュール
//!
//! フィールドごとに「キーワード（部分一致）」と「完全一致選択」の
//! 2つの状態を持ち、完全一致 > キーワード > なし の優先順で絞り込む。
//!
//! ## 処理フロー
//! 1. 操作イベントで FilterStateStore を更新
//! 2. データセット全体から filter_view で毎回再計算
//! 3. Color → Element Name → Category → Dimensions の順に AND で絞り込み
//!
//! 選択肢（candidate options）は各フィールドが受け取った時点の
//! 絞り込み結果から作るため、フィールド順に依存する。
//! 最終的な行集合は順序に依存しない。

use crate::error::Error;
use crate::types::{Dataset, PartRecord};
use std::collections::BTreeSet;

/// フィルタ対象フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    Color,
    ElementName,
    Category,
    Dimensions,
}

impl FilterField {
    /// 適用順
    pub const ALL: [FilterField; 4] = [
        FilterField::Color,
        FilterField::ElementName,
        FilterField::Category,
        FilterField::Dimensions,
    ];

    /// 列名（表示ラベル兼用）
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Color => "Color",
            FilterField::ElementName => "Element Name",
            FilterField::Category => "Category",
            FilterField::Dimensions => "Dimensions",
        }
    }

    /// レコードから値を取得（欠損は None）
    pub fn value(self, record: &PartRecord) -> Option<&str> {
        match self {
            FilterField::Color => record.color(),
            FilterField::ElementName => record.element_name(),
            FilterField::Category => Some(record.category().as_str()),
            FilterField::Dimensions => Some(record.dimensions()),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for FilterField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "color" | "colour" => Ok(FilterField::Color),
            "element name" | "element-name" | "element_name" | "name" => Ok(FilterField::ElementName),
            "category" => Ok(FilterField::Category),
            "dimensions" | "dimension" | "dims" => Ok(FilterField::Dimensions),
            _ => Err(Error::UnknownField(s.to_string())),
        }
    }
}

/// フィールド1つ分のフィルタ状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterEntry {
    pub keyword: String,
    pub selected: String,
}

/// 実際に効くフィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode<'a> {
    /// 完全一致（大文字小文字を区別）
    Exact(&'a str),
    /// 部分一致（大文字小文字を区別しない）
    Keyword(&'a str),
    /// 絞り込みなし
    Pass,
}

impl FilterEntry {
    pub fn new(keyword: impl Into<String>, selected: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            selected: selected.into(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.keyword.is_empty() && self.selected.is_empty()
    }

    /// 選択が空でなければ選択、次にキーワード
    pub fn mode(&self) -> FilterMode<'_> {
        if !self.selected.is_empty() {
            FilterMode::Exact(&self.selected)
        } else if !self.keyword.is_empty() {
            FilterMode::Keyword(&self.keyword)
        } else {
            FilterMode::Pass
        }
    }
}

/// ユーザー操作イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// キーワード入力
    SetKeyword(FilterField, String),
    /// 完全一致の選択（空文字で解除）
    Select(FilterField, String),
    /// 全フィルタをクリア
    ClearAll,
}

/// セッション単位のフィルタ状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStateStore {
    entries: [FilterEntry; 4],
}

impl FilterStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FilterField) -> &FilterEntry {
        &self.entries[field.index()]
    }

    pub fn set_keyword(&mut self, field: FilterField, value: impl Into<String>) {
        self.entries[field.index()].keyword = value.into();
    }

    pub fn set_selected(&mut self, field: FilterField, value: impl Into<String>) {
        self.entries[field.index()].selected = value.into();
    }

    /// 全フィールドを既定値に戻す
    pub fn reset_all(&mut self) {
        self.entries = Default::default();
    }

    pub fn handle(&mut self, event: FilterEvent) {
        match event {
            FilterEvent::SetKeyword(field, value) => self.set_keyword(field, value),
            FilterEvent::Select(field, value) => self.set_selected(field, value),
            FilterEvent::ClearAll => self.reset_all(),
        }
    }

    pub fn is_clear(&self) -> bool {
        self.entries.iter().all(FilterEntry::is_default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &FilterEntry)> {
        FilterField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }
}

/// 1フィールド分のフィルタを適用
pub fn apply<'a>(
    rows: &[&'a PartRecord],
    field: FilterField,
    entry: &FilterEntry,
) -> Vec<&'a PartRecord> {
    match entry.mode() {
        FilterMode::Exact(selected) => rows
            .iter()
            .copied()
            .filter(|r| field.value(r) == Some(selected))
            .collect(),
        FilterMode::Keyword(keyword) => {
            let needle = keyword.to_lowercase();
            rows.iter()
                .copied()
                .filter(|r| {
                    field
                        .value(r)
                        .is_some_and(|v| v.to_lowercase().contains(&needle))
                })
                .collect()
        }
        FilterMode::Pass => rows.to_vec(),
    }
}

/// 完全一致の選択肢を取得（重複除去・昇順）
///
/// 欠損値と空文字は含めない。空文字は「選択なし」を表すため。
pub fn candidate_options(rows: &[&PartRecord], field: FilterField, keyword: &str) -> Vec<String> {
    let needle = keyword.to_lowercase();
    rows.iter()
        .filter_map(|r| field.value(r))
        .filter(|v| !v.is_empty() && v.to_lowercase().contains(&needle))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// セレクタに並べる値: 先頭に空文字（選択なし）
pub fn selector_choices(options: &[String]) -> Vec<String> {
    std::iter::once(String::new())
        .chain(options.iter().cloned())
        .collect()
}

/// 絞り込み結果
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    pub rows: Vec<&'a PartRecord>,
    options: [Vec<String>; 4],
}

impl FilteredView<'_> {
    /// そのフィールドが受け取った時点の選択肢
    pub fn options(&self, field: FilterField) -> &[String] {
        &self.options[field.index()]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// データセット全体から絞り込みを再計算
pub fn filter_view<'a>(dataset: &'a Dataset, store: &FilterStateStore) -> FilteredView<'a> {
    let mut view = FilteredView {
        rows: dataset.iter().collect(),
        options: Default::default(),
    };

    for (field, entry) in store.iter() {
        view.options[field.index()] = candidate_options(&view.rows, field, &entry.keyword);
        let before = view.rows.len();
        view.rows = apply(&view.rows, field, entry);
        if !entry.is_default() {
            log::debug!("filter {}: {} -> {} rows", field, before, view.rows.len());
        }
    }

    view
}
