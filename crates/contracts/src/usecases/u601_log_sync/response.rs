use crate::enums::SyncMode;
use crate::shared::log_record::LogRecord;
use serde::{Deserialize, Serialize};

use super::progress::SyncPhase;

/// Положение окна в страничном режиме
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Текущая страница с нуля
    pub page_no: u32,
    /// Всего страниц, не меньше 1
    pub total_pages: u32,
    pub total_count: u64,
}

impl PageInfo {
    pub fn new(page_no: u32, page_size: u32, total_count: u64) -> Self {
        let pages = total_count.div_ceil(u64::from(page_size.max(1))).max(1);
        Self {
            page_no,
            total_pages: u32::try_from(pages).unwrap_or(u32::MAX),
            total_count,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page_no > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_no + 1 < self.total_pages
    }
}

/// Материализованный вид журнала для слоя отображения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderView {
    pub target: String,
    pub mode: SyncMode,
    pub records: Vec<LogRecord>,
    pub page: Option<PageInfo>,
    pub phase: SyncPhase,
    pub last_error: Option<String>,
    pub generation: u64,
}

impl RenderView {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
