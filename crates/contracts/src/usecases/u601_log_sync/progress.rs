use serde::{Deserialize, Serialize};

/// Фаза цикла синхронизации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    /// Ожидание следующего тика или действия оператора
    #[default]
    Idle,
    /// Запрос к устройству выполняется
    Fetching,
    /// Последний запрос завершился ошибкой, прежний вид сохранен
    Failed,
}
