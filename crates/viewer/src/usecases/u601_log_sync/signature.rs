use contracts::shared::filter::FilterSpec;
use contracts::shared::log_record::LogRecord;

/// Отпечаток страницы: времена записей, общее количество, номер страницы
/// и параметры фильтра. Одинаковые записи под другим фильтром или на
/// другой странице дают другую сигнатуру.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSignature {
    times: Vec<String>,
    total_count: u64,
    page_no: u32,
    filter: String,
}

impl PageSignature {
    pub fn new(records: &[LogRecord], total_count: u64, page_no: u32, filter: &FilterSpec) -> Self {
        Self {
            times: records.iter().map(|r| r.time.clone()).collect(),
            total_count,
            page_no,
            filter: filter.serialized(),
        }
    }
}

/// Подавляет повторную отрисовку, если обновление вернуло ту же страницу
#[derive(Debug, Default)]
pub struct SignatureDedupEngine {
    last_signature: Option<PageSignature>,
    render_set: Vec<LogRecord>,
    render_total_count: u64,
}

impl SignatureDedupEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true`, если сигнатура отличается от последней принятой
    pub fn should_update(&self, signature: &PageSignature) -> bool {
        self.last_signature.as_ref() != Some(signature)
    }

    /// Принимает страницу, если она изменилась. Возвращает `true`, если
    /// набор для отрисовки был заменен.
    pub fn offer(&mut self, signature: PageSignature, records: Vec<LogRecord>, total_count: u64) -> bool {
        if !self.should_update(&signature) {
            return false;
        }
        self.last_signature = Some(signature);
        self.render_set = records;
        self.render_total_count = total_count;
        true
    }

    /// Следующая страница будет считаться новой; текущий набор остается
    pub fn invalidate(&mut self) {
        self.last_signature = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn render_set(&self) -> &[LogRecord] {
        &self.render_set
    }

    pub fn render_total_count(&self) -> u64 {
        self.render_total_count
    }
}
