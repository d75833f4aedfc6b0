use serde::{Deserialize, Serialize};

/// Режим синхронизации, выбирается при старте сессии
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Оператор листает окна фиксированного размера
    #[default]
    Paged,
    /// Все записи накапливаются в локальном буфере
    Continuous,
}

impl SyncMode {
    pub fn code(&self) -> &'static str {
        match self {
            SyncMode::Paged => "paged",
            SyncMode::Continuous => "continuous",
        }
    }
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
