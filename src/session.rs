//! 対話式絞り込みモジュール
//!
//! 1回の操作 = 1イベント。イベントごとにフィルタ状態を更新し、
//! データセット全体から絞り込みを再計算して再表示する。

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::export;
use crate::render;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use parts_lookup_common::{
    filter_view, selector_choices, Dataset, FilterEvent, FilterField, FilterStateStore,
    FilteredView,
};
use std::path::{Path, PathBuf};

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// キーワード入力
    Keyword(FilterField),
    /// 完全一致を選択
    Pick(FilterField),
    /// 全フィルタをクリア
    ClearAll,
    /// 現在の結果を出力
    Export,
    /// 終了
    Quit,
}

/// 対話セッション（1プロセス1セッション）
pub struct LookupSession<'a> {
    dataset: &'a Dataset,
    store: FilterStateStore,
    images_dir: PathBuf,
}

impl<'a> LookupSession<'a> {
    pub fn new(dataset: &'a Dataset, images_dir: &Path) -> Self {
        Self {
            dataset,
            store: FilterStateStore::new(),
            images_dir: images_dir.to_path_buf(),
        }
    }

    pub fn store(&self) -> &FilterStateStore {
        &self.store
    }

    /// 現在の状態で全体を再計算
    pub fn view(&self) -> FilteredView<'a> {
        filter_view(self.dataset, &self.store)
    }

    /// イベントを適用して再計算
    pub fn handle(&mut self, event: FilterEvent) -> FilteredView<'a> {
        log::debug!("event: {:?}", event);
        self.store.handle(event);
        self.view()
    }

    /// メニュー項目（表示ラベル, 操作）
    pub fn menu_items(&self) -> Vec<(String, MenuAction)> {
        let mut items = Vec::new();
        for (field, entry) in self.store.iter() {
            items.push((
                format!("{} contains... [{}]", field, entry.keyword),
                MenuAction::Keyword(field),
            ));
            items.push((
                format!("Pick exact {} (optional) [{}]", field, entry.selected),
                MenuAction::Pick(field),
            ));
        }
        items.push(("🔄 Clear All Filters".to_string(), MenuAction::ClearAll));
        items.push(("💾 Export".to_string(), MenuAction::Export));
        items.push(("Quit".to_string(), MenuAction::Quit));
        items
    }

    /// 対話ループ
    pub fn run(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();
        let mut view = self.view();
        let mut cursor = 0;

        loop {
            render::print_view(&view, &self.store, &self.images_dir);

            let items = self.menu_items();
            let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();
            cursor = Select::with_theme(&theme)
                .with_prompt("操作を選択")
                .items(&labels)
                .default(cursor)
                .interact()?;
            let action = items[cursor].1;

            let event = match action {
                MenuAction::Keyword(field) => {
                    let current = self.store.get(field).keyword.clone();
                    let keyword: String = Input::with_theme(&theme)
                        .with_prompt(format!("{} contains...", field))
                        .with_initial_text(current)
                        .allow_empty(true)
                        .interact_text()?;
                    FilterEvent::SetKeyword(field, keyword)
                }
                MenuAction::Pick(field) => {
                    let choices = selector_choices(view.options(field));
                    let current = &self.store.get(field).selected;
                    let default = choices.iter().position(|c| c == current).unwrap_or(0);
                    let labels: Vec<&str> = choices
                        .iter()
                        .map(|c| if c.is_empty() { "(なし)" } else { c.as_str() })
                        .collect();
                    let index = Select::with_theme(&theme)
                        .with_prompt(format!("Pick exact {} (optional)", field))
                        .items(&labels)
                        .default(default)
                        .max_length(15)
                        .interact()?;
                    FilterEvent::Select(field, choices[index].clone())
                }
                MenuAction::ClearAll => {
                    println!("✔ フィルタをクリアしました");
                    FilterEvent::ClearAll
                }
                MenuAction::Export => {
                    self.prompt_export(&theme, &view)?;
                    continue;
                }
                MenuAction::Quit => break,
            };

            view = self.handle(event);
        }

        Ok(())
    }

    fn prompt_export(&self, theme: &ColorfulTheme, view: &FilteredView<'_>) -> Result<()> {
        let formats = [ExportFormat::Excel, ExportFormat::Json];
        let index = Select::with_theme(theme)
            .with_prompt("出力形式")
            .items(&["Excel (.xlsx)", "JSON"])
            .default(0)
            .interact()?;
        let output: String = Input::with_theme(theme)
            .with_prompt("出力先")
            .default(".".to_string())
            .interact_text()?;

        if let Err(e) = export::export_rows(&view.rows, &formats[index], Path::new(&output), &self.images_dir) {
            log::warn!("export failed: {}", e);
            println!("⚠ 出力エラー: {}", e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parts_lookup_common::PartRecord;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            PartRecord::new("75192", "300121", Some("Red".into()), Some("Brick 2x4".into())),
            PartRecord::new("75192", "302101", Some("Black".into()), Some("Plate 1x2".into())),
            PartRecord::new("75192", "4211065", Some("Red".into()), Some("Tile 1x2".into())),
        ])
    }

    #[test]
    fn test_session_recomputes_on_event() {
        let dataset = dataset();
        let mut session = LookupSession::new(&dataset, Path::new("images"));
        assert_eq!(session.view().len(), 3);

        let view = session.handle(FilterEvent::Select(FilterField::Color, "Red".into()));
        assert_eq!(view.len(), 2);

        let view = session.handle(FilterEvent::SetKeyword(FilterField::ElementName, "tile".into()));
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows[0].element_id(), "4211065");
    }

    #[test]
    fn test_session_clear_all() {
        let dataset = dataset();
        let mut session = LookupSession::new(&dataset, Path::new("images"));
        session.handle(FilterEvent::SetKeyword(FilterField::Category, "zzz".into()));
        assert!(session.view().is_empty());

        let view = session.handle(FilterEvent::ClearAll);
        assert!(session.store().is_clear());
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_keyword_kept_as_typed() {
        let dataset = Dataset::from_records(vec![
            PartRecord::new("3001", "a", Some("Red".into()), Some("Brick 2 x 4".into())),
            PartRecord::new("3001", "b", Some("Red".into()), Some("Brick 2x4".into())),
        ]);
        let mut session = LookupSession::new(&dataset, Path::new("images"));

        let view = session.handle(FilterEvent::SetKeyword(FilterField::ElementName, " x ".into()));
        assert_eq!(session.store().get(FilterField::ElementName).keyword, " x ");
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows[0].element_id(), "a");
    }

    #[test]
    fn test_menu_items() {
        let dataset = dataset();
        let mut session = LookupSession::new(&dataset, Path::new("images"));
        session.handle(FilterEvent::SetKeyword(FilterField::Color, "re".into()));

        let items = session.menu_items();
        assert_eq!(items.len(), FilterField::ALL.len() * 2 + 3);
        assert_eq!(items[0].0, "Color contains... [re]");
        assert_eq!(items[0].1, MenuAction::Keyword(FilterField::Color));
        assert_eq!(items[1].1, MenuAction::Pick(FilterField::Color));
        assert_eq!(items.last().map(|i| i.1), Some(MenuAction::Quit));
    }
}
