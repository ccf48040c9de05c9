use crate::cli::SourceArgs;
use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 既定の在庫スプレッドシート
    pub inventory_path: Option<PathBuf>,
    /// 画像フォルダ
    pub images_dir: PathBuf,
    /// 既定のシート名
    pub sheet: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inventory_path: None,
            images_dir: PathBuf::from("images"),
            sheet: None,
        }
    }
}

/// 引数と設定を突き合わせた入力元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub images_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            log::debug!("config: {}", config_path.display());
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LookupError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("parts-lookup").join("config.json"))
    }

    /// 引数を優先し、なければ設定値を使う
    pub fn resolve_source(&self, args: &SourceArgs) -> Result<ResolvedSource> {
        let input = args
            .input
            .clone()
            .or_else(|| self.inventory_path.clone())
            .ok_or(LookupError::NoInventory)?;

        if !input.exists() {
            return Err(LookupError::FileNotFound(input.display().to_string()));
        }

        Ok(ResolvedSource {
            input,
            sheet: args.sheet.clone().or_else(|| self.sheet.clone()),
            images_dir: args.images.clone().unwrap_or_else(|| self.images_dir.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.images_dir, PathBuf::from("images"));
        assert!(config.inventory_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            inventory_path: Some(PathBuf::from("/data/falcon.xlsx")),
            images_dir: PathBuf::from("/data/images"),
            sheet: Some("Parts".into()),
        };
        config.save_to(&path).expect("設定保存失敗");

        let loaded = Config::load_from(&path).expect("設定読み込み失敗");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let loaded = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_partial_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"sheet": "Sheet2"}"#).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.sheet.as_deref(), Some("Sheet2"));
        assert_eq!(loaded.images_dir, PathBuf::from("images"));
    }

    #[test]
    fn test_resolve_source_prefers_args() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("inventory.xlsx");
        std::fs::write(&input, b"dummy").unwrap();

        let config = Config {
            inventory_path: Some(PathBuf::from("/nonexistent.xlsx")),
            sheet: Some("Default".into()),
            ..Default::default()
        };
        let args = SourceArgs {
            input: Some(input.clone()),
            sheet: None,
            images: Some(dir.path().join("pics")),
        };
        let resolved = config.resolve_source(&args).unwrap();
        assert_eq!(resolved.input, input);
        assert_eq!(resolved.sheet.as_deref(), Some("Default"));
        assert_eq!(resolved.images_dir, dir.path().join("pics"));
    }

    #[test]
    fn test_resolve_source_without_input() {
        let err = Config::default().resolve_source(&SourceArgs::default()).unwrap_err();
        assert!(matches!(err, LookupError::NoInventory));
    }

    #[test]
    fn test_resolve_source_missing_file() {
        let args = SourceArgs {
            input: Some(PathBuf::from("/nonexistent/inventory.xlsx")),
            ..Default::default()
        };
        let err = Config::default().resolve_source(&args).unwrap_err();
        assert!(matches!(err, LookupError::FileNotFound(_)));
    }
}
