use contracts::shared::log_record::LogRecord;
use contracts::usecases::u601_log_sync::PageInfo;

/// Форматирует количество записей с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use viewer::shared::format::format_count;
/// assert_eq!(format_count(1234567), "1.234.567");
/// assert_eq!(format_count(0), "0");
/// ```
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Строка записи: `[target] time | message`
pub fn format_record_line(target: &str, record: &LogRecord) -> String {
    format!("[{}] {} | {}", target, record.time, record.log_message)
}

/// Строка навигации: `Page 2 / 5 (1.234)`
pub fn format_page_line(page: &PageInfo) -> String {
    format!(
        "Page {} / {} ({})",
        page.page_no + 1,
        page.total_pages,
        format_count(page.total_count)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::{LogCategory, LogType};

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.000");
        assert_eq!(format_count(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_record_line() {
        let record = LogRecord {
            time: "2024-01-01 10:00:00".to_string(),
            time_iso: "2024-01-01T10:00:00".to_string(),
            log_type: LogType::Error,
            log_category: LogCategory::Network,
            log_message: "link down".to_string(),
        };
        assert_eq!(
            format_record_line("192.168.0.240", &record),
            "[192.168.0.240] 2024-01-01 10:00:00 | link down"
        );
    }

    #[test]
    fn test_format_page_line_is_one_based() {
        assert_eq!(format_page_line(&PageInfo::new(1, 50, 1234)), "Page 2 / 25 (1.234)");
        assert_eq!(format_page_line(&PageInfo::new(0, 50, 0)), "Page 1 / 1 (0)");
    }
}
