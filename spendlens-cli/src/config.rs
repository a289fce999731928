use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSection {
    /// Falls back to the OPENAI_API_KEY env var when unset.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmSection {
                api_key: None,
                model: "gpt-4o-mini".to_string(),
                base_url: "https://api.openai.com".to_string(),
            },
        }
    }
}

pub fn spendlens_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not resolve home directory")?;
    let dir = home.join(".spendlens");
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    }
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(spendlens_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote default config: {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.llm.api_key = Some("sk-test".to_string());
        cfg.llm.model = "gpt-4o".to_string();
        save_config_to(&path, &cfg).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(loaded.llm.model, "gpt-4o");
    }

    #[test]
    fn test_missing_config_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.llm.api_key.is_none());
        assert_eq!(cfg.llm.base_url, "https://api.openai.com");
    }
}
