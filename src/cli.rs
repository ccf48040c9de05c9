use clap::{Args, Parser, Subcommand};
use parts_lookup_common::{FilterField, FilterStateStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parts-lookup")]
#[command(about = "部品在庫の検索・絞り込みツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 入力ソースの指定（省略時は設定ファイルの値）
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// 在庫スプレッドシート (.xlsx/.xls/.ods)
    pub input: Option<PathBuf>,

    /// シート名（デフォルト: 先頭シート）
    #[arg(long)]
    pub sheet: Option<String>,

    /// 画像フォルダ（{DesignID}_{ElementID}.png を探す）
    #[arg(long)]
    pub images: Option<PathBuf>,
}

/// フィールドごとのフィルタ指定
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Color の部分一致
    #[arg(long)]
    pub color_keyword: Option<String>,

    /// Color の完全一致
    #[arg(long)]
    pub color: Option<String>,

    /// Element Name の部分一致
    #[arg(long)]
    pub name_keyword: Option<String>,

    /// Element Name の完全一致
    #[arg(long)]
    pub name: Option<String>,

    /// Category の部分一致
    #[arg(long)]
    pub category_keyword: Option<String>,

    /// Category の完全一致 (Brick/Plate/Tile/Slope/Technic/Other)
    #[arg(long)]
    pub category: Option<String>,

    /// Dimensions の部分一致
    #[arg(long)]
    pub dimensions_keyword: Option<String>,

    /// Dimensions の完全一致
    #[arg(long)]
    pub dimensions: Option<String>,
}

impl FilterArgs {
    /// 引数からフィルタ状態を組み立てる
    pub fn to_store(&self) -> FilterStateStore {
        let mut store = FilterStateStore::new();
        let pairs = [
            (FilterField::Color, &self.color_keyword, &self.color),
            (FilterField::ElementName, &self.name_keyword, &self.name),
            (FilterField::Category, &self.category_keyword, &self.category),
            (FilterField::Dimensions, &self.dimensions_keyword, &self.dimensions),
        ];
        for (field, keyword, selected) in pairs {
            if let Some(keyword) = keyword {
                store.set_keyword(field, keyword.as_str());
            }
            if let Some(selected) = selected {
                store.set_selected(field, selected.as_str());
            }
        }
        store
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式で絞り込み（入力のたびに再計算）
    Lookup {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// フィルタを指定して一覧を表示
    Search {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// フィールドの選択肢（完全一致候補）を表示
    Options {
        /// 対象フィールド (color/name/category/dimensions)
        #[arg(required = true)]
        field: FilterField,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// 絞り込み結果をExcel/JSONに出力
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// 出力形式 (excel/json)
        #[arg(short, long, default_value = "excel")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の在庫スプレッドシートを設定
        #[arg(long)]
        set_inventory: Option<PathBuf>,

        /// 既定の画像フォルダを設定
        #[arg(long)]
        set_images_dir: Option<PathBuf>,

        /// 既定のシート名を設定
        #[arg(long)]
        set_sheet: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Excel,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use excel or json", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}
