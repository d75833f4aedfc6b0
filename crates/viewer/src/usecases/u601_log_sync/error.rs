use thiserror::Error;

/// Ошибки цикла синхронизации журнала.
///
/// Ни одна из них не завершает сессию: транспортные и протокольные ошибки
/// переводят планировщик в `Failed`, ошибка конфигурации отклоняет действие.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("config error: {0}")]
    Config(String),
}

impl SyncError {
    /// Повторять ли запрос внутри одной выборки
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Transport(_))
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SyncError::Transport(format!("request timed out: {}", e))
        } else if e.is_connect() {
            SyncError::Transport(format!("connection failed: {}", e))
        } else if e.is_decode() || e.is_body() {
            SyncError::Protocol(format!("cannot read response body: {}", e))
        } else {
            SyncError::Transport(e.to_string())
        }
    }
}
