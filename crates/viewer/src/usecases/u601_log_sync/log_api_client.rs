use async_trait::async_trait;
use contracts::enums::{LogCategory, LogType};
use contracts::shared::filter::FilterSpec;
use contracts::shared::log_record::LogRecord;
use contracts::shared::target::SyncTarget;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::SyncError;

/// Одна страница ответа устройства
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogPage {
    pub records: Vec<LogRecord>,
    pub total_count: u64,
}

/// Источник журнала. Фильтрация, пагинация и сортировка выполняются на
/// стороне устройства согласно `spec`, `page_no` и `page_size`.
#[async_trait]
pub trait RemoteLogSource: Send + Sync {
    async fn fetch(
        &self,
        target: &SyncTarget,
        spec: &FilterSpec,
        page_no: u32,
        page_size: u32,
    ) -> Result<LogPage, SyncError>;
}

/// Политика повторов транспортных ошибок внутри одной выборки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Всего попыток, включая первую
    pub max_attempts: u32,
    /// Пауза перед второй попыткой, далее удваивается
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

/// Таймауты соединения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(2),
            read: Duration::from_secs(5),
        }
    }
}

/// HTTP-клиент для API журнала устройства (GET /api/g/log)
pub struct HttpLogSource {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpLogSource {
    pub fn new(timeouts: HttpTimeouts, retry: RetryPolicy) -> Result<Self, SyncError> {
        // Один запрос в полете, поэтому одного соединения в пуле достаточно
        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.connect + timeouts.read)
            .pool_max_idle_per_host(1)
            .no_proxy()
            .build()
            .map_err(|e| SyncError::Config(format!("cannot create HTTP client: {}", e)))?;

        Ok(Self { client, retry })
    }

    async fn fetch_once(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<LogPage, SyncError> {
        tracing::debug!("Log API: GET {} {:?}", url, params);

        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Protocol(format!(
                "HTTP {} from {}: {}",
                status,
                url,
                preview(&body)
            )));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

#[async_trait]
impl RemoteLogSource for HttpLogSource {
    async fn fetch(
        &self,
        target: &SyncTarget,
        spec: &FilterSpec,
        page_no: u32,
        page_size: u32,
    ) -> Result<LogPage, SyncError> {
        let url = target.log_url();
        let today = chrono::Local::now().date_naive();
        let params = build_query_params(&spec.resolved(today), page_no, page_size);
        let page = with_retry(self.retry, target, || self.fetch_once(&url, &params)).await?;
        tracing::debug!(
            "Log API: {} records, total {} (page {})",
            page.records.len(),
            page.total_count,
            page_no
        );
        Ok(page)
    }
}

/// Повторяет `op`, пока ошибка транспортная и попытки не исчерпаны
pub async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    target: &SyncTarget,
    mut op: F,
) -> Result<T, SyncError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, SyncError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    "Log API attempt {}/{} to {} failed: {}. Retrying in {:?}",
                    attempt,
                    max_attempts,
                    target,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Параметры запроса; даты в `spec` должны быть уже подставлены
pub fn build_query_params(
    spec: &FilterSpec,
    page_no: u32,
    page_size: u32,
) -> Vec<(&'static str, String)> {
    let date_or_empty = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
    vec![
        ("pageSize", page_size.to_string()),
        ("pageNo", page_no.to_string()),
        ("searchPeriodFrom", date_or_empty(spec.date_from)),
        ("searchPeriodTo", date_or_empty(spec.date_to)),
        ("logCategory", spec.category_param()),
        ("logType", spec.type_param()),
        ("order", spec.order.as_param().to_string()),
    ]
}

pub fn parse_response(body: &str) -> Result<LogPage, SyncError> {
    let response: LogApiResponse = serde_json::from_str(body).map_err(|e| {
        SyncError::Protocol(format!("malformed log response: {}. Body: {}", e, preview(body)))
    })?;

    let records = response
        .data
        .log_list
        .into_iter()
        .map(LogRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LogPage {
        records,
        total_count: response.data.log_total_count,
    })
}

fn preview(body: &str) -> String {
    let preview: String = body.chars().take(200).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}

// ============================================================================
// Структуры ответа API журнала
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogApiResponse {
    pub data: LogApiData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogApiData {
    #[serde(rename = "logList")]
    pub log_list: Vec<LogApiRecord>,

    #[serde(rename = "logTotalCount")]
    pub log_total_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogApiRecord {
    pub time: String, // Время для отображения

    #[serde(rename = "timeISO")]
    pub time_iso: String, // Время ISO 8601, сортируемое

    #[serde(rename = "logType")]
    pub log_type: u8,

    #[serde(rename = "logCategory")]
    pub log_category: u8,

    #[serde(rename = "logMessage")]
    pub log_message: String,
}

impl TryFrom<LogApiRecord> for LogRecord {
    type Error = SyncError;

    fn try_from(raw: LogApiRecord) -> Result<Self, Self::Error> {
        let log_type = LogType::from_code(raw.log_type).ok_or_else(|| {
            SyncError::Protocol(format!("unknown logType code {}", raw.log_type))
        })?;
        let log_category = LogCategory::from_code(raw.log_category).ok_or_else(|| {
            SyncError::Protocol(format!("unknown logCategory code {}", raw.log_category))
        })?;

        Ok(LogRecord {
            time: raw.time,
            time_iso: raw.time_iso,
            log_type,
            log_category,
            log_message: raw.log_message,
        })
    }
}
