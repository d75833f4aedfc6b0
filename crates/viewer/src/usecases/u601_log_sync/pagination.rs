use contracts::usecases::u601_log_sync::PageInfo;

/// Состояние страничной навигации. Номер страницы всегда лежит в
/// `[0, max_page]`; значения вне диапазона прижимаются к границе.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationController {
    page_no: u32,
    page_size: u32,
    total_count: u64,
}

impl PaginationController {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_no: 0,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    pub fn page_no(&self) -> u32 {
        self.page_no
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn max_page(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(self.page_size));
        u32::try_from(pages.saturating_sub(1)).unwrap_or(u32::MAX)
    }

    /// Переход на страницу `n` с прижатием. Возвращает `true`, если номер изменился.
    pub fn set_page(&mut self, n: u32) -> bool {
        let clamped = n.min(self.max_page());
        let changed = clamped != self.page_no;
        self.page_no = clamped;
        changed
    }

    pub fn next(&mut self) -> bool {
        self.set_page(self.page_no.saturating_add(1))
    }

    pub fn prev(&mut self) -> bool {
        self.set_page(self.page_no.saturating_sub(1))
    }

    /// Пересчитывает границу после нового ответа сервера.
    /// Возвращает `true`, если текущая страница была прижата.
    pub fn on_total_count_changed(&mut self, total_count: u64) -> bool {
        self.total_count = total_count;
        let max_page = self.max_page();
        if self.page_no > max_page {
            self.page_no = max_page;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page_no = 0;
    }

    pub fn page_info(&self, total_count: u64) -> PageInfo {
        PageInfo::new(self.page_no, self.page_size, total_count)
    }
}
