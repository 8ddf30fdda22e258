//! Configuration types for daisy.
//!
//! [`Config::load`] reads `~/.config/daisy/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).
//!
//! Provider credentials are kept out of the TOML file: [`ApiKeys::load`]
//! reads them from a properties file (`API_KEY=...`, `S_API_KEY=...`).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::controller::SearchOptions;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[provider]
completions_url  = "https://api.openai.com/v1/chat/completions"
model            = "gpt-3.5-turbo"
max_tokens       = 800
timeout_secs     = 40
image_search_url = "https://serpapi.com/search.json"
image_engine     = "google_images"
keys_file        = ""

[search]
quiet_period_ms = 1000
auto_submit     = false

[store]
data_dir = ""

[ui]
theme                 = "default"
detail_pane_width_pct = 55

[keybindings]
query_focus   = "/"
next_tab      = "]"
prev_tab      = "["
refresh       = "r"
dismiss_error = "x"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/daisy/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[provider]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSection {
    #[serde(default = "default_completions_url")]
    pub completions_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_image_search_url")]
    pub image_search_url: String,
    #[serde(default = "default_image_engine")]
    pub image_engine: String,
    /// Path of the properties file holding the API keys. Empty means
    /// `api.properties` next to `config.toml`.
    #[serde(default)]
    pub keys_file: String,
}

fn default_completions_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_model() -> String { "gpt-3.5-turbo".to_string() }
fn default_max_tokens() -> u32 { 800 }
fn default_timeout_secs() -> u64 { 40 }
fn default_image_search_url() -> String { "https://serpapi.com/search.json".to_string() }
fn default_image_engine() -> String { "google_images".to_string() }

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            completions_url: default_completions_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            image_search_url: default_image_search_url(),
            image_engine: default_image_engine(),
            keys_file: String::new(),
        }
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
    #[serde(default)]
    pub auto_submit: bool,
}

fn default_quiet_period_ms() -> u64 { 1000 }

impl Default for SearchSection {
    fn default() -> Self {
        Self { quiet_period_ms: default_quiet_period_ms(), auto_submit: false }
    }
}

/// `[store]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSection {
    /// Directory for the preference files. Empty means the XDG data dir.
    #[serde(default)]
    pub data_dir: String,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_detail_pane_width_pct")]
    pub detail_pane_width_pct: u16,
}

fn default_theme() -> String { "default".to_string() }
fn default_detail_pane_width_pct() -> u16 { 55 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            detail_pane_width_pct: default_detail_pane_width_pct(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_query_focus")]
    pub query_focus: String,
    #[serde(default = "default_next_tab")]
    pub next_tab: String,
    #[serde(default = "default_prev_tab")]
    pub prev_tab: String,
    #[serde(default = "default_refresh")]
    pub refresh: String,
    #[serde(default = "default_dismiss_error")]
    pub dismiss_error: String,
}

fn default_query_focus() -> String { "/".to_string() }
fn default_next_tab() -> String { "]".to_string() }
fn default_prev_tab() -> String { "[".to_string() }
fn default_refresh() -> String { "r".to_string() }
fn default_dismiss_error() -> String { "x".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            query_focus: default_query_focus(),
            next_tab: default_next_tab(),
            prev_tab: default_prev_tab(),
            refresh: default_refresh(),
            dismiss_error: default_dismiss_error(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/daisy/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load `path` layered on top of the built-in defaults. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            quiet_period: Duration::from_millis(self.search.quiet_period_ms),
            auto_submit: self.search.auto_submit,
        }
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    /// Directory holding the per-catalog preference files.
    pub fn data_dir(&self) -> PathBuf {
        if self.store.data_dir.trim().is_empty() {
            default_data_dir()
        } else {
            expand_home(&self.store.data_dir)
        }
    }

    /// Location of the API key properties file.
    pub fn keys_path(&self) -> PathBuf {
        if self.provider.keys_file.trim().is_empty() {
            config_dir().join("api.properties")
        } else {
            expand_home(&self.provider.keys_file)
        }
    }
}

// ---------------------------------------------------------------------------
// API keys
// ---------------------------------------------------------------------------

/// Credentials for the text-generation and image-search providers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiKeys {
    /// Text-generation provider key.
    #[serde(default, alias = "API_KEY")]
    pub api_key: String,
    /// Image-search provider key.
    #[serde(default, alias = "S_API_KEY")]
    pub s_api_key: String,
}

impl ApiKeys {
    /// Read the properties file at `path`. A missing file yields empty keys;
    /// the provider reports them as a configuration error when used.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config: api key file not found");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_properties_str(&raw)
    }

    /// Parse `KEY=value` lines. Values may be wrapped in double quotes.
    pub fn from_properties_str(src: &str) -> anyhow::Result<Self> {
        let keys: ApiKeys = config::Config::builder()
            .add_source(config::File::from_str(src, config::FileFormat::Ini))
            .build()?
            .try_deserialize()?;
        Ok(Self {
            api_key: unquote(&keys.api_key),
            s_api_key: unquote(&keys.s_api_key),
        })
    }
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("daisy")
}

fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

fn default_data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"))
        .join("daisy")
}

fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(raw),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.provider.model, "gpt-3.5-turbo");
        assert_eq!(cfg.provider.max_tokens, 800);
        assert_eq!(cfg.provider_timeout(), Duration::from_secs(40));
        assert_eq!(cfg.search.quiet_period_ms, 1000);
        assert!(!cfg.search.auto_submit);
        assert_eq!(cfg.keybindings.query_focus, "/");
        assert_eq!(cfg.keybindings.next_tab, "]");
    }

    #[test]
    fn user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\nauto_submit = true\nquiet_period_ms = 250\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        let opts = cfg.search_options();
        assert!(opts.auto_submit);
        assert_eq!(opts.quiet_period, Duration::from_millis(250));
        assert_eq!(cfg.provider.image_engine, "google_images");
    }

    #[test]
    fn explicit_data_dir_is_used() {
        let mut cfg = Config::defaults();
        cfg.store.data_dir = "/tmp/daisy-data".into();
        assert_eq!(cfg.data_dir(), PathBuf::from("/tmp/daisy-data"));
    }

    #[test]
    fn properties_file_keys() {
        let keys = ApiKeys::from_properties_str("API_KEY=\"sk-test\"\nS_API_KEY=serp-123\n").unwrap();
        assert_eq!(keys.api_key, "sk-test");
        assert_eq!(keys.s_api_key, "serp-123");
    }

    #[test]
    fn missing_properties_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let keys = ApiKeys::load(&dir.path().join("api.properties")).unwrap();
        assert!(keys.api_key.is_empty());
    }
}
