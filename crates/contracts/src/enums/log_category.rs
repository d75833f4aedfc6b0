use serde::{Deserialize, Serialize};

/// Категория записи журнала устройства.
///
/// `Reserved` (код 6) не выбирается оператором: устройство всегда
/// получает его в фильтре категорий.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogCategory {
    System,
    Control,
    IODevice,
    Database,
    Network,
    Security,
    Reserved,
    Script,
    Schedule,
    Recipe,
}

impl LogCategory {
    pub fn code(&self) -> u8 {
        match self {
            LogCategory::System => 0,
            LogCategory::Control => 1,
            LogCategory::IODevice => 2,
            LogCategory::Database => 3,
            LogCategory::Network => 4,
            LogCategory::Security => 5,
            LogCategory::Reserved => 6,
            LogCategory::Script => 7,
            LogCategory::Schedule => 8,
            LogCategory::Recipe => 9,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LogCategory::System => "System",
            LogCategory::Control => "Control",
            LogCategory::IODevice => "IO Device",
            LogCategory::Database => "Database",
            LogCategory::Network => "Network",
            LogCategory::Security => "Security",
            LogCategory::Reserved => "Reserved",
            LogCategory::Script => "Script",
            LogCategory::Schedule => "Schedule",
            LogCategory::Recipe => "Recipe",
        }
    }

    /// Категории, доступные оператору для выбора (без `Reserved`)
    pub fn all() -> Vec<LogCategory> {
        vec![
            LogCategory::System,
            LogCategory::Control,
            LogCategory::IODevice,
            LogCategory::Database,
            LogCategory::Network,
            LogCategory::Security,
            LogCategory::Script,
            LogCategory::Schedule,
            LogCategory::Recipe,
        ]
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LogCategory::System),
            1 => Some(LogCategory::Control),
            2 => Some(LogCategory::IODevice),
            3 => Some(LogCategory::Database),
            4 => Some(LogCategory::Network),
            5 => Some(LogCategory::Security),
            6 => Some(LogCategory::Reserved),
            7 => Some(LogCategory::Script),
            8 => Some(LogCategory::Schedule),
            9 => Some(LogCategory::Recipe),
            _ => None,
        }
    }

    /// Парсинг из имени ("io device", "iodevice") или кода ("2")
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Ok(code) = name.parse::<u8>() {
            return Self::from_code(code);
        }
        let wanted: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        Self::all().into_iter().find(|c| {
            let known: String = c
                .display_name()
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .collect();
            known.eq_ignore_ascii_case(&wanted)
        })
    }
}

impl std::fmt::Display for LogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_is_not_user_selectable() {
        assert!(!LogCategory::all().contains(&LogCategory::Reserved));
        assert_eq!(LogCategory::Reserved.code(), 6);
        assert_eq!(LogCategory::from_code(6), Some(LogCategory::Reserved));
    }

    #[test]
    fn test_from_name_ignores_case_and_spaces() {
        assert_eq!(LogCategory::from_name("io device"), Some(LogCategory::IODevice));
        assert_eq!(LogCategory::from_name("IODevice"), Some(LogCategory::IODevice));
        assert_eq!(LogCategory::from_name("9"), Some(LogCategory::Recipe));
        assert_eq!(LogCategory::from_name("reserved"), None);
        assert_eq!(LogCategory::from_name("10"), None);
    }
}
