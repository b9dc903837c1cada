use serde::Deserialize;
use tracing::warn;

/// Application configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telegram bot token
    pub bot_token: String,
    /// Telegram Bot API base URL
    pub api_base_url: String,
    /// Long-poll timeout in seconds
    pub poll_timeout_secs: u64,
    /// Directory the generated exam files are written to
    pub output_dir: String,
    /// TTF font used for Arabic text; builtin fallback when missing
    pub font_path: String,
    /// Ministry name printed at the top of every exam
    pub ministry_name: String,
    /// Questions per page before a page break is inserted
    pub questions_per_page: usize,
    /// Fragments at or below this length are dropped as noise
    pub min_question_len: usize,
    /// Idle chat sessions are discarded after this many seconds
    pub session_timeout_secs: u64,
    /// Whether to log question previews
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base_url: "https://api.telegram.org".to_string(),
            poll_timeout_secs: 30,
            output_dir: "exams".to_string(),
            font_path: "fonts/arial.ttf".to_string(),
            ministry_name: "وزارة التربية العراقية".to_string(),
            questions_per_page: 3,
            min_question_len: 2,
            session_timeout_secs: 1800,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// Load configuration: `config.toml` if present, then env overrides
    pub fn load() -> Self {
        let base = Self::from_file("config.toml").unwrap_or_default();
        base.with_env_overrides()
    }

    /// Read configuration from a TOML file
    pub fn from_file(path: &str) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("⚠️ ignoring unparseable config file {}: {}", path, e);
                None
            }
        }
    }

    /// Apply environment variable overrides on top of the current values
    pub fn with_env_overrides(self) -> Self {
        Self {
            bot_token: std::env::var("BOT_TOKEN").unwrap_or(self.bot_token),
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(self.api_base_url),
            poll_timeout_secs: std::env::var("POLL_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.poll_timeout_secs),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(self.output_dir),
            font_path: std::env::var("FONT_PATH").unwrap_or(self.font_path),
            ministry_name: std::env::var("MINISTRY_NAME").unwrap_or(self.ministry_name),
            questions_per_page: std::env::var("QUESTIONS_PER_PAGE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.questions_per_page),
            min_question_len: std::env::var("MIN_QUESTION_LEN").ok().and_then(|v| v.parse().ok()).unwrap_or(self.min_question_len),
            session_timeout_secs: std::env::var("SESSION_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.session_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}
