use crate::enums::{LogCategory, LogType};
use serde::{Deserialize, Serialize};

/// Запись журнала, полученная с устройства
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Время для отображения, как его отдает устройство
    pub time: String,
    /// Сортируемое время (ISO 8601), используется как курсор
    #[serde(rename = "timeISO")]
    pub time_iso: String,
    pub log_type: LogType,
    pub log_category: LogCategory,
    pub log_message: String,
}

impl LogRecord {
    /// Две записи совпадают, только если совпадают и время, и текст
    pub fn identity(&self) -> (&str, &str) {
        (&self.time_iso, &self.log_message)
    }

    pub fn is_error(&self) -> bool {
        self.log_type == LogType::Error
    }
}
