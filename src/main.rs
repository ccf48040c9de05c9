use clap::Parser;
use parts_lookup::{cli, config, error, export, render, session};
use cli::{Cli, Commands};
use config::{Config, ResolvedSource};
use error::Result;
use parts_lookup_common::{filter_view, loader, Dataset};
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Lookup { source } => {
            println!("📦 parts-lookup - 在庫検索\n");
            let source = config.resolve_source(&source)?;
            let dataset = load(&source)?;

            let mut session = session::LookupSession::new(&dataset, &source.images_dir);
            session.run()?;
        }

        Commands::Search { source, filters, json } => {
            let source = config.resolve_source(&source)?;
            let dataset = load_quiet(&source, json)?;
            let store = filters.to_store();
            let view = filter_view(&dataset, &store);

            if json {
                println!("{}", serde_json::to_string_pretty(&view.rows)?);
            } else {
                render::print_view(&view, &store, &source.images_dir);
            }
        }

        Commands::Options { field, source, filters } => {
            let source = config.resolve_source(&source)?;
            let dataset = load(&source)?;
            let store = filters.to_store();
            let view = filter_view(&dataset, &store);

            println!("{}", render::render_options(field, view.options(field)));
        }

        Commands::Export { source, filters, format, output } => {
            println!("📄 parts-lookup - エクスポート\n");
            let source = config.resolve_source(&source)?;
            let dataset = load(&source)?;
            let store = filters.to_store();
            let view = filter_view(&dataset, &store);
            println!("🔍 {}", render::describe_filters(&store));

            let output = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_rows(&view.rows, &format, &output, &source.images_dir)?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Config { set_inventory, set_images_dir, set_sheet, show } => {
            let mut config = config;
            let changed = set_inventory.is_some() || set_images_dir.is_some() || set_sheet.is_some();

            if let Some(path) = set_inventory {
                config.inventory_path = Some(path);
            }
            if let Some(dir) = set_images_dir {
                config.images_dir = dir;
            }
            if let Some(sheet) = set_sheet {
                config.sheet = Some(sheet);
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!(
                    "  在庫ファイル: {}",
                    config
                        .inventory_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("  画像フォルダ: {}", config.images_dir.display());
                println!("  シート: {}", config.sheet.as_deref().unwrap_or("(先頭シート)"));
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load(source: &ResolvedSource) -> Result<Dataset> {
    load_quiet(source, false)
}

/// JSON出力時は標準出力を汚さない
fn load_quiet(source: &ResolvedSource, quiet: bool) -> Result<Dataset> {
    if !quiet {
        println!("- 読み込み中: {}", source.input.display());
    }
    let dataset = loader::load_dataset(&source.input, source.sheet.as_deref())?;
    if !quiet {
        println!(
            "✔ {}件の部品を読み込み [{}]\n",
            dataset.len(),
            dataset.sheet().unwrap_or("-")
        );
    }
    if !source.images_dir.is_dir() {
        log::warn!("images directory not found: {}", source.images_dir.display());
    }
    Ok(dataset)
}
