use contracts::shared::log_record::LogRecord;
use std::collections::HashSet;

/// Буфер непрерывного режима.
///
/// Принимаются только записи с `time_iso` строго больше курсора; курсор не
/// убывает. Пока курсора нет (сразу после сброса), первая выборка
/// принимается целиком, включая записи с одинаковым временем.
#[derive(Debug)]
pub struct AccumulationBuffer {
    records: Vec<LogRecord>,
    identities: HashSet<(String, String)>,
    cursor: Option<String>,
    max_retained: usize,
}

fn owned_identity(record: &LogRecord) -> (String, String) {
    let (time_iso, message) = record.identity();
    (time_iso.to_owned(), message.to_owned())
}

impl AccumulationBuffer {
    pub fn new(max_retained: usize) -> Self {
        Self {
            records: Vec::new(),
            identities: HashSet::new(),
            cursor: None,
            max_retained: max_retained.max(1),
        }
    }

    /// Добавляет новые записи в порядке выборки и возвращает добавленные
    pub fn merge(&mut self, batch: Vec<LogRecord>) -> Vec<LogRecord> {
        let mut appended = Vec::new();
        for record in batch {
            if let Some(cursor) = &self.cursor {
                if record.time_iso.as_str() <= cursor.as_str() {
                    continue;
                }
            }
            if !self.identities.insert(owned_identity(&record)) {
                continue;
            }
            appended.push(record);
        }

        if let Some(max) = appended.iter().map(|r| r.time_iso.as_str()).max() {
            if self.cursor.as_deref().map_or(true, |c| max > c) {
                self.cursor = Some(max.to_string());
            }
        }

        self.records.extend(appended.iter().cloned());
        self.enforce_retention();
        appended
    }

    /// Последние `limit` записей, новые сверху
    pub fn present(&self, limit: usize) -> Vec<LogRecord> {
        let mut sorted = self.records.clone();
        // стабильная сортировка: при равном времени сохраняется порядок вставки
        sorted.sort_by(|a, b| b.time_iso.cmp(&a.time_iso));
        sorted.truncate(limit);
        sorted
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reset(&mut self) {
        self.records.clear();
        self.identities.clear();
        self.cursor = None;
    }

    fn enforce_retention(&mut self) {
        if self.records.len() <= self.max_retained {
            return;
        }
        let excess = self.records.len() - self.max_retained;
        let mut by_time: Vec<usize> = (0..self.records.len()).collect();
        by_time.sort_by(|&a, &b| self.records[a].time_iso.cmp(&self.records[b].time_iso));
        let dropped: HashSet<usize> = by_time.into_iter().take(excess).collect();

        let mut index = 0;
        let identities = &mut self.identities;
        self.records.retain(|r| {
            let keep = !dropped.contains(&index);
            if !keep {
                identities.remove(&owned_identity(r));
            }
            index += 1;
            keep
        });
    }
}
