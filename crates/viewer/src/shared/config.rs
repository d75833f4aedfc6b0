use contracts::enums::{LogCategory, LogType, SortOrder, SyncMode};
use contracts::shared::filter::FilterSpec;
use serde::Deserialize;
use std::time::Duration;

use crate::usecases::u601_log_sync::{HttpTimeouts, RetryPolicy, SchedulerSettings};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub viewer: ViewerConfig,
    pub paged: PagedConfig,
    pub continuous: ContinuousConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewerConfig {
    /// Адрес устройства при старте
    pub target: String,
    #[serde(default)]
    pub mode: SyncMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PagedConfig {
    pub page_size: u32,
    pub refresh_sec: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContinuousConfig {
    pub page_size: u32,
    pub refresh_sec: u64,
    pub display_limit: usize,
    pub max_retained: usize,
    pub page_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

/// Начальный фильтр. Пустой список категорий или типов означает "все".
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FilterConfig {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub order: Option<String>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[viewer]
target = "192.168.0.240"
mode = "paged"

[paged]
page_size = 50
refresh_sec = 10

[continuous]
page_size = 100
refresh_sec = 2
display_limit = 300
max_retained = 10000
page_delay_ms = 200

[http]
connect_timeout_ms = 2000
read_timeout_ms = 5000
max_attempts = 3
backoff_ms = 250
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> anyhow::Result<()> {
        if self.paged.page_size == 0 || self.continuous.page_size == 0 {
            anyhow::bail!("page_size must be greater than zero");
        }
        if self.paged.refresh_sec == 0 || self.continuous.refresh_sec == 0 {
            anyhow::bail!("refresh_sec must be greater than zero");
        }
        if self.continuous.display_limit == 0 || self.continuous.max_retained == 0 {
            anyhow::bail!("display_limit and max_retained must be greater than zero");
        }
        if self.http.connect_timeout_ms == 0 || self.http.read_timeout_ms == 0 {
            anyhow::bail!("HTTP timeouts must be bounded and greater than zero");
        }
        self.filter_spec()?;
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        let secs = match self.viewer.mode {
            SyncMode::Paged => self.paged.refresh_sec,
            SyncMode::Continuous => self.continuous.refresh_sec,
        };
        Duration::from_secs(secs)
    }

    pub fn scheduler_settings(&self) -> SchedulerSettings {
        match self.viewer.mode {
            SyncMode::Paged => SchedulerSettings::paged(self.paged.page_size),
            SyncMode::Continuous => SchedulerSettings {
                page_delay: Duration::from_millis(self.continuous.page_delay_ms),
                ..SchedulerSettings::continuous(
                    self.continuous.page_size,
                    self.continuous.display_limit,
                    self.continuous.max_retained,
                )
            },
        }
    }

    pub fn http_timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect: Duration::from_millis(self.http.connect_timeout_ms),
            read: Duration::from_millis(self.http.read_timeout_ms),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.http.max_attempts.max(1),
            backoff: Duration::from_millis(self.http.backoff_ms),
        }
    }

    pub fn filter_spec(&self) -> anyhow::Result<FilterSpec> {
        let mut spec = FilterSpec::default();

        if !self.filter.categories.is_empty() {
            spec.categories = self
                .filter
                .categories
                .iter()
                .map(|name| {
                    LogCategory::from_name(name)
                        .ok_or_else(|| anyhow::anyhow!("unknown log category '{}'", name))
                })
                .collect::<anyhow::Result<_>>()?;
        }
        if !self.filter.types.is_empty() {
            spec.types = self
                .filter
                .types
                .iter()
                .map(|name| {
                    LogType::from_name(name).ok_or_else(|| anyhow::anyhow!("unknown log type '{}'", name))
                })
                .collect::<anyhow::Result<_>>()?;
        }
        if let Some(order) = &self.filter.order {
            spec.order = SortOrder::from_param(order)
                .ok_or_else(|| anyhow::anyhow!("unknown sort order '{}'", order))?;
        }
        Ok(spec)
    }
}
