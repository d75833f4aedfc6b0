use crate::enums::{LogCategory, LogType, SortOrder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Фильтр запроса журнала.
///
/// Пустой `types` означает "без фильтра по типу": так его трактует API
/// устройства. Пустые даты подставляются как "сегодня" в момент запроса.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub categories: BTreeSet<LogCategory>,
    pub types: BTreeSet<LogType>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub order: SortOrder,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            categories: LogCategory::all().into_iter().collect(),
            types: LogType::all().into_iter().collect(),
            date_from: None,
            date_to: None,
            order: SortOrder::Desc,
        }
    }
}

impl FilterSpec {
    /// Копия фильтра с заполненными датами
    pub fn resolved(&self, today: NaiveDate) -> Self {
        Self {
            date_from: Some(self.date_from.unwrap_or(today)),
            date_to: Some(self.date_to.unwrap_or(today)),
            ..self.clone()
        }
    }

    pub fn with_order(&self, order: SortOrder) -> Self {
        Self {
            order,
            ..self.clone()
        }
    }

    /// Коды категорий через запятую; код `Reserved` присутствует всегда
    pub fn category_param(&self) -> String {
        let mut codes: BTreeSet<u8> = self.categories.iter().map(|c| c.code()).collect();
        codes.insert(LogCategory::Reserved.code());
        join_codes(codes)
    }

    /// Коды типов через запятую; пустая строка - без фильтра
    pub fn type_param(&self) -> String {
        join_codes(self.types.iter().map(|t| t.code()).collect())
    }

    /// Параметры фильтра одной строкой, для сигнатуры страницы
    pub fn serialized(&self) -> String {
        format!(
            "cat={};type={};from={};to={};order={}",
            self.category_param(),
            self.type_param(),
            self.date_from.map(|d| d.to_string()).unwrap_or_default(),
            self.date_to.map(|d| d.to_string()).unwrap_or_default(),
            self.order.as_param(),
        )
    }
}

fn join_codes(codes: BTreeSet<u8>) -> String {
    codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
