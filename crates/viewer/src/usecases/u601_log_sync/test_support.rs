use async_trait::async_trait;
use contracts::enums::{LogCategory, LogType, SortOrder};
use contracts::shared::filter::FilterSpec;
use contracts::shared::log_record::LogRecord;
use contracts::shared::target::SyncTarget;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::error::SyncError;
use super::log_api_client::{LogPage, RemoteLogSource};

/// Один вызов `fetch`, как его увидел источник
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub target: String,
    pub page_no: u32,
    pub page_size: u32,
    pub order: SortOrder,
    pub category_param: String,
}

/// Источник с заранее заданными ответами
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<LogPage, SyncError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<LogPage, SyncError>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn push_page(&self, records: Vec<LogRecord>, total_count: u64) -> &Self {
        self.push(Ok(LogPage {
            records,
            total_count,
        }))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteLogSource for ScriptedSource {
    async fn fetch(
        &self,
        target: &SyncTarget,
        spec: &FilterSpec,
        page_no: u32,
        page_size: u32,
    ) -> Result<LogPage, SyncError> {
        self.calls.lock().unwrap().push(RecordedCall {
            target: target.address().to_string(),
            page_no,
            page_size,
            order: spec.order,
            category_param: spec.category_param(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SyncError::Transport("no scripted response".to_string())))
    }
}

pub fn record(time_iso: &str, log_type: LogType, message: &str) -> LogRecord {
    LogRecord {
        time: time_iso.replace('T', " "),
        time_iso: time_iso.to_string(),
        log_type,
        log_category: LogCategory::System,
        log_message: message.to_string(),
    }
}
