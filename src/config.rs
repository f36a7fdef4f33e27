use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides the development base URL when set
pub const BASE_URL_ENV: &str = "SENDLOG_API_BASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No base URL configured for the {0} environment")]
    MissingBaseUrl(Environment),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSettings,
    pub layout: LayoutConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// `[api]` section as written in the config file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub environment: Environment,
    /// Base URL used in development (overridable with SENDLOG_API_BASE_URL)
    pub development_url: String,
    /// Base URL used in production; must be set to run against production
    pub production_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Resolved connection settings handed to the API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Body column width in characters
    pub body_width: u16,
    /// Subject column width in characters
    pub subject_width: u16,
    /// Seconds a notification stays on screen
    pub toast_secs: u64,
}

/// Semantic theme configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    // Base colors
    pub bg: String,
    pub bg_panel: String,
    pub bg_element: String,
    pub fg: String,
    pub fg_muted: String,
    pub fg_subtle: String,

    // Border colors
    pub border: String,
    pub border_active: String,

    // Accent colors
    pub primary: String,
    pub secondary: String,

    // Semantic colors
    pub success: String,
    pub error: String,
    pub info: String,

    // Table
    pub header_bg: String,
    pub row_alt_bg: String,
    pub selected_bg: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            development_url: "http://127.0.0.1:8000/api/".to_string(),
            production_url: None,
            timeout_secs: 30,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            body_width: 32,
            subject_width: 24,
            toast_secs: 4,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            // Base colors
            bg: "#0f172a".to_string(),
            bg_panel: "#1e293b".to_string(),
            bg_element: "#334155".to_string(),
            fg: "#f8fafc".to_string(),
            fg_muted: "#94a3b8".to_string(),
            fg_subtle: "#cbd5e1".to_string(),

            // Border colors
            border: "#475569".to_string(),
            border_active: "#60a5fa".to_string(), // primary

            // Accent colors
            primary: "#60a5fa".to_string(),
            secondary: "#a5b4fc".to_string(),

            // Semantic colors
            success: "#4ade80".to_string(),
            error: "#f87171".to_string(),
            info: "#38bdf8".to_string(),

            // Table
            header_bg: "#2563eb".to_string(),
            row_alt_bg: "#172554".to_string(),
            selected_bg: "#334155".to_string(), // bg_element
        }
    }
}

impl Config {
    /// Default location: `<config dir>/sendlog/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("sendlog/config.toml"))
            .unwrap_or_else(|| PathBuf::from(shellexpand::tilde("~/.config/sendlog/config.toml").as_ref()))
    }

    /// Load from `path` (or the default location). Falls back to defaults
    /// when the file is missing or broken.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if !config_path.exists() {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            return Self::default();
        }

        match Self::from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{} ({})", e, config_path.display());
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

impl ApiSettings {
    /// Resolve the base URL for the selected environment, consulting
    /// SENDLOG_API_BASE_URL in development.
    pub fn resolve(&self) -> Result<ApiConfig, ConfigError> {
        self.resolve_with(std::env::var(BASE_URL_ENV).ok())
    }

    pub fn resolve_with(&self, env_base_url: Option<String>) -> Result<ApiConfig, ConfigError> {
        let base_url = match self.environment {
            Environment::Development => env_base_url
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| self.development_url.clone()),
            Environment::Production => self
                .production_url
                .clone()
                .filter(|s| !s.trim().is_empty())
                .ok_or(ConfigError::MissingBaseUrl(Environment::Production))?,
        };

        Ok(ApiConfig {
            base_url,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

impl ThemeConfig {
    pub fn bg(&self) -> ratatui::style::Color {
        parse_color(&self.bg)
    }
    pub fn bg_panel(&self) -> ratatui::style::Color {
        parse_color(&self.bg_panel)
    }
    pub fn bg_element(&self) -> ratatui::style::Color {
        parse_color(&self.bg_element)
    }
    pub fn fg(&self) -> ratatui::style::Color {
        parse_color(&self.fg)
    }
    pub fn fg_muted(&self) -> ratatui::style::Color {
        parse_color(&self.fg_muted)
    }
    pub fn fg_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.fg_subtle)
    }
    pub fn border(&self) -> ratatui::style::Color {
        parse_color(&self.border)
    }
    pub fn border_active(&self) -> ratatui::style::Color {
        parse_color(&self.border_active)
    }
    pub fn primary(&self) -> ratatui::style::Color {
        parse_color(&self.primary)
    }
    pub fn secondary(&self) -> ratatui::style::Color {
        parse_color(&self.secondary)
    }
    pub fn success(&self) -> ratatui::style::Color {
        parse_color(&self.success)
    }
    pub fn error(&self) -> ratatui::style::Color {
        parse_color(&self.error)
    }
    pub fn info(&self) -> ratatui::style::Color {
        parse_color(&self.info)
    }
    pub fn header_bg(&self) -> ratatui::style::Color {
        parse_color(&self.header_bg)
    }
    pub fn row_alt_bg(&self) -> ratatui::style::Color {
        parse_color(&self.row_alt_bg)
    }
    pub fn selected_bg(&self) -> ratatui::style::Color {
        parse_color(&self.selected_bg)
    }
}

/// Parse color string to ratatui Color
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    // #RRGGBB, ASCII hex digits only
    if let Some(hex) = s.strip_prefix('#')
        && hex.len() == 6
        && hex.bytes().all(|b| b.is_ascii_hexdigit())
        && let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        )
    {
        return Color::Rgb(r, g, b);
    }

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightblue" => Color::LightBlue,
        "white" => Color::White,
        _ => Color::White,
    }
}
