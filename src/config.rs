use crate::error::{DocLinkError, Result};
use doclink_common::DEFAULT_HEADER_LABEL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const LABEL_ENV: &str = "DOCLINK_HEADER_LABEL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ID列の見出しラベル
    pub header_label: String,
    /// 進捗表示の間隔（行数、0で非表示）
    pub progress_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_label: DEFAULT_HEADER_LABEL.into(),
            progress_interval: 100,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        // 環境変数を優先
        if let Ok(label) = std::env::var(LABEL_ENV) {
            if !label.trim().is_empty() {
                config.header_label = label;
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DocLinkError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("doclink").join("config.json"))
    }

    pub fn set_header_label(&mut self, label: String) -> Result<()> {
        if label.trim().is_empty() {
            return Err(DocLinkError::Config("見出しラベルが空です".into()));
        }
        self.header_label = label;
        self.save()
    }

    pub fn set_progress_interval(&mut self, interval: usize) -> Result<()> {
        self.progress_interval = interval;
        self.save()
    }
}
