use std::path::PathBuf;

/// Fuzzy similarity strategy used by the match filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    PartialRatio,
    JaroWinkler,
}

impl std::fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatcherKind::PartialRatio => write!(f, "partial_ratio"),
            MatcherKind::JaroWinkler => write!(f, "jaro_winkler"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub backend_url: String,
    pub postal_code: Option<String>,
    pub database_path: PathBuf,
    pub log_level: String,
    pub debug: bool,
    pub responses_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub max_concurrent_items: usize,
    pub match_threshold: u8,
    pub matcher: MatcherKind,
    pub units_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("backend_url", &self.backend_url)
            .field("postal_code", &self.postal_code)
            .field("database_path", &self.database_path)
            .field("log_level", &self.log_level)
            .field("debug", &self.debug)
            .field("responses_dir", &self.responses_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("max_concurrent_items", &self.max_concurrent_items)
            .field("match_threshold", &self.match_threshold)
            .field("matcher", &self.matcher)
            .field("units_path", &self.units_path)
            .finish()
    }
}
