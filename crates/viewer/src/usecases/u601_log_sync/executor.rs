use contracts::enums::SortOrder;
use contracts::shared::filter::FilterSpec;
use contracts::shared::target::SyncTarget;
use std::time::Duration;

use super::error::SyncError;
use super::log_api_client::{LogPage, RemoteLogSource};

/// Что именно запросить у устройства на этом цикле
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Одна страница (страничный режим)
    Page {
        target: SyncTarget,
        spec: FilterSpec,
        page_no: u32,
        page_size: u32,
    },
    /// Все записи по фильтру (непрерывный режим)
    All {
        target: SyncTarget,
        spec: FilterSpec,
        page_size: u32,
        page_delay: Duration,
    },
}

/// Выполняет запрос. Не трогает состояние сессии.
pub async fn execute(source: &dyn RemoteLogSource, request: &FetchRequest) -> Result<LogPage, SyncError> {
    match request {
        FetchRequest::Page {
            target,
            spec,
            page_no,
            page_size,
        } => source.fetch(target, spec, *page_no, *page_size).await,
        FetchRequest::All {
            target,
            spec,
            page_size,
            page_delay,
        } => fetch_all(source, target, spec, *page_size, *page_delay).await,
    }
}

/// Пробный запрос одной строки дает общее количество, затем все страницы
/// читаются по возрастанию времени.
pub async fn fetch_all(
    source: &dyn RemoteLogSource,
    target: &SyncTarget,
    spec: &FilterSpec,
    page_size: u32,
    page_delay: Duration,
) -> Result<LogPage, SyncError> {
    let page_size = page_size.max(1);
    let spec = spec.with_order(SortOrder::Asc);

    let total_count = source.fetch(target, &spec, 0, 1).await?.total_count;
    let pages = u32::try_from(total_count.div_ceil(u64::from(page_size)))
        .map_err(|_| SyncError::Protocol(format!("implausible logTotalCount {}", total_count)))?;

    let mut records = Vec::new();
    for page_no in 0..pages {
        if page_no > 0 && !page_delay.is_zero() {
            tokio::time::sleep(page_delay).await;
        }
        let page = source.fetch(target, &spec, page_no, page_size).await?;
        records.extend(page.records);
    }

    tracing::debug!(
        "Full pull from {}: {} pages, {} records (reported total {})",
        target,
        pages,
        records.len(),
        total_count
    );

    Ok(LogPage {
        records,
        total_count,
    })
}
