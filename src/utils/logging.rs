//! Logging utilities
//!
//! Subscriber setup plus the formatted lifecycle banners.

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global tracing subscriber (RUST_LOG aware, info by default)
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Log the startup banner
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 exam bot starting - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("📁 output directory: {}", config.output_dir);
    info!("🔤 font: {}", config.font_path);
    info!("📄 questions per page: {}", config.questions_per_page);
    info!("{}", "=".repeat(60));
}

/// Truncate long text for log display
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_text("سؤال", 10), "سؤال");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let text = "سؤال طويل جداً عن الجغرافيا";
        let cut = truncate_text(text, 9);
        assert_eq!(cut.chars().count(), 12); // 9 kept + "..."
        assert!(cut.ends_with("..."));
    }
}
