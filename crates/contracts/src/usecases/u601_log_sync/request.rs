use crate::enums::{LogCategory, LogType, SortOrder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Действие оператора, влияющее на параметры синхронизации
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserAction {
    NextPage,
    PrevPage,
    /// Номер страницы с нуля
    GoToPage { page_no: u32 },
    SetTarget { address: String },
    SetCategories { categories: BTreeSet<LogCategory> },
    SetTypes { types: BTreeSet<LogType> },
    SetDateRange {
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    },
    SetOrder { order: SortOrder },
    /// Обновить без изменения параметров
    Refresh,
}
