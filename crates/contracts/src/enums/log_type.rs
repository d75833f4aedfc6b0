use serde::{Deserialize, Serialize};

/// Тип записи журнала устройства
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogType {
    Info,
    Trace,
    Error,
    User,
}

impl LogType {
    /// Числовой код, который ожидает API устройства
    pub fn code(&self) -> u8 {
        match self {
            LogType::Info => 0,
            LogType::Trace => 1,
            LogType::Error => 2,
            LogType::User => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LogType::Info => "Info",
            LogType::Trace => "Trace",
            LogType::Error => "Error",
            LogType::User => "User",
        }
    }

    pub fn all() -> Vec<LogType> {
        vec![LogType::Info, LogType::Trace, LogType::Error, LogType::User]
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LogType::Info),
            1 => Some(LogType::Trace),
            2 => Some(LogType::Error),
            3 => Some(LogType::User),
            _ => None,
        }
    }

    /// Парсинг из имени ("error") или кода ("2")
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Ok(code) = name.parse::<u8>() {
            return Self::from_code(code);
        }
        Self::all()
            .into_iter()
            .find(|t| t.display_name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
