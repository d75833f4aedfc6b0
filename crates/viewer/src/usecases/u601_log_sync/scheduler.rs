use chrono::NaiveDate;
use contracts::enums::SyncMode;
use contracts::shared::filter::FilterSpec;
use contracts::shared::target::SyncTarget;
use contracts::usecases::u601_log_sync::{RenderView, SyncPhase, UserAction};
use std::time::Duration;

use super::accumulation::AccumulationBuffer;
use super::error::SyncError;
use super::executor::{self, FetchRequest};
use super::log_api_client::{LogPage, RemoteLogSource};
use super::pagination::PaginationController;
use super::signature::{PageSignature, SignatureDedupEngine};

/// Параметры сессии, выбираются при старте
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub mode: SyncMode,
    pub page_size: u32,
    /// Сколько записей показывать в непрерывном режиме
    pub display_limit: usize,
    /// Предел размера буфера непрерывного режима
    pub max_retained: usize,
    /// Пауза между страницами полной выборки
    pub page_delay: Duration,
}

impl SchedulerSettings {
    pub fn paged(page_size: u32) -> Self {
        Self {
            mode: SyncMode::Paged,
            page_size,
            display_limit: page_size as usize,
            max_retained: page_size as usize,
            page_delay: Duration::ZERO,
        }
    }

    pub fn continuous(page_size: u32, display_limit: usize, max_retained: usize) -> Self {
        Self {
            mode: SyncMode::Continuous,
            page_size,
            display_limit,
            max_retained,
            page_delay: Duration::ZERO,
        }
    }
}

/// Все состояние одной сессии просмотра. Меняется только планировщиком.
#[derive(Debug)]
pub struct SessionState {
    pub target: SyncTarget,
    pub filter: FilterSpec,
    pub pagination: PaginationController,
    pub dedup: SignatureDedupEngine,
    pub buffer: AccumulationBuffer,
}

impl SessionState {
    fn new(target: SyncTarget, filter: FilterSpec, settings: &SchedulerSettings) -> Self {
        Self {
            target,
            filter,
            pagination: PaginationController::new(settings.page_size),
            dedup: SignatureDedupEngine::new(),
            buffer: AccumulationBuffer::new(settings.max_retained),
        }
    }

    /// Сбрасывает все производное от параметров: страницу, курсор, буфер, сигнатуру
    fn reset_derived(&mut self) {
        self.pagination.reset();
        self.pagination.on_total_count_changed(0);
        self.dedup.reset();
        self.buffer.reset();
    }
}

/// Запрос, выданный планировщиком, с поколением, к которому он относится
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: FetchRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Результат принят; `changed` - изменился ли вид
    Applied { changed: bool },
    /// Ошибка записана, прежний вид сохранен
    Failed,
    /// Результат относится к устаревшему поколению и отброшен
    Discarded,
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Конечный автомат fetch -> merge -> present.
///
/// Одновременно выполняется не больше одной выборки. Триггер, пришедший во
/// время выборки, не запускает вторую, а взводит единственный флаг
/// `pending`; после завершения текущей выборки выполняется ровно одна
/// следующая.
pub struct SyncScheduler {
    settings: SchedulerSettings,
    state: SessionState,
    phase: SyncPhase,
    generation: u64,
    in_flight: Option<u64>,
    pending: bool,
    last_error: Option<String>,
    today: fn() -> NaiveDate,
}

impl SyncScheduler {
    pub fn new(target: SyncTarget, filter: FilterSpec, settings: SchedulerSettings) -> Self {
        let state = SessionState::new(target, filter, &settings);
        Self {
            settings,
            state,
            phase: SyncPhase::Idle,
            generation: 0,
            in_flight: None,
            pending: false,
            last_error: None,
            today: local_today,
        }
    }

    /// Подменяет источник "сегодняшней" даты для фильтра по умолчанию
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn mode(&self) -> SyncMode {
        self.settings.mode
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Применяет действие оператора. Ошибка возможна только для адреса
    /// устройства; в этом случае состояние не меняется.
    pub fn apply(&mut self, action: UserAction) -> Result<(), SyncError> {
        match action {
            UserAction::NextPage => self.navigate(|p| p.next()),
            UserAction::PrevPage => self.navigate(|p| p.prev()),
            UserAction::GoToPage { page_no } => self.navigate(|p| p.set_page(page_no)),
            UserAction::SetTarget { address } => return self.set_target(&address),
            UserAction::SetCategories { categories } => {
                let filter = FilterSpec {
                    categories,
                    ..self.state.filter.clone()
                };
                self.set_filter(filter);
            }
            UserAction::SetTypes { types } => {
                let filter = FilterSpec {
                    types,
                    ..self.state.filter.clone()
                };
                self.set_filter(filter);
            }
            UserAction::SetDateRange { date_from, date_to } => {
                let filter = FilterSpec {
                    date_from,
                    date_to,
                    ..self.state.filter.clone()
                };
                self.set_filter(filter);
            }
            UserAction::SetOrder { order } if self.settings.mode == SyncMode::Continuous => {
                tracing::debug!("Order {:?} ignored in continuous mode", order);
            }
            UserAction::SetOrder { order } => {
                let filter = self.state.filter.with_order(order);
                self.set_filter(filter);
            }
            UserAction::Refresh => {}
        }
        Ok(())
    }

    /// Смена устройства: новое поколение, все производное состояние сброшено
    pub fn set_target(&mut self, address: &str) -> Result<(), SyncError> {
        let target = match SyncTarget::parse(address) {
            Ok(t) => t,
            Err(message) => {
                let err = SyncError::Config(message);
                tracing::warn!("Rejected target '{}': {}", address, err);
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        if target == self.state.target {
            return Ok(());
        }

        tracing::info!("Target changed: {} -> {}", self.state.target, target);
        let filter = self.state.filter.clone();
        self.state = SessionState::new(target, filter, &self.settings);
        self.bump_generation();
        self.phase = SyncPhase::Idle;
        self.last_error = None;
        Ok(())
    }

    fn set_filter(&mut self, filter: FilterSpec) {
        if filter == self.state.filter {
            return;
        }
        tracing::info!(
            "Filter changed: {} -> {}",
            self.state.filter.serialized(),
            filter.serialized()
        );
        self.state.filter = filter;
        self.state.reset_derived();
        self.bump_generation();
    }

    fn navigate(&mut self, step: impl FnOnce(&mut PaginationController) -> bool) {
        if self.settings.mode != SyncMode::Paged {
            tracing::debug!("Page navigation ignored in {} mode", self.settings.mode);
            return;
        }
        if step(&mut self.state.pagination) {
            tracing::debug!("Page changed to {}", self.state.pagination.page_no());
            self.state.dedup.invalidate();
            self.bump_generation();
        }
    }

    fn bump_generation(&mut self) {
        self.generation += 1;
    }

    /// Начинает выборку, если ни одна не выполняется. Иначе взводит
    /// `pending` и возвращает `None`.
    pub fn request_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() {
            self.pending = true;
            return None;
        }

        let spec = self.state.filter.resolved((self.today)());
        let target = self.state.target.clone();
        let request = match self.settings.mode {
            SyncMode::Paged => FetchRequest::Page {
                target,
                spec,
                page_no: self.state.pagination.page_no(),
                page_size: self.state.pagination.page_size(),
            },
            SyncMode::Continuous => FetchRequest::All {
                target,
                spec,
                page_size: self.settings.page_size,
                page_delay: self.settings.page_delay,
            },
        };

        self.phase = SyncPhase::Fetching;
        self.in_flight = Some(self.generation);
        Some(FetchTicket {
            generation: self.generation,
            request,
        })
    }

    /// Забирает флаг отложенного триггера
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<LogPage, SyncError>,
    ) -> FetchOutcome {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
        }

        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding result of generation {} (current {})",
                ticket.generation,
                self.generation
            );
            if self.in_flight.is_none() && self.phase == SyncPhase::Fetching {
                self.phase = SyncPhase::Idle;
            }
            return FetchOutcome::Discarded;
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Log sync from {} failed: {}", self.state.target, e);
                self.phase = SyncPhase::Failed;
                self.last_error = Some(e.to_string());
                return FetchOutcome::Failed;
            }
        };

        self.phase = SyncPhase::Idle;
        self.last_error = None;

        let changed = match ticket.request {
            FetchRequest::Page { spec, page_no, .. } => self.merge_page(spec, page_no, page),
            FetchRequest::All { .. } => self.merge_continuous(page),
        };
        FetchOutcome::Applied { changed }
    }

    fn merge_page(&mut self, spec: FilterSpec, page_no: u32, page: LogPage) -> bool {
        if self.state.pagination.on_total_count_changed(page.total_count) {
            // запрошенная страница вышла за границу: не показываем ее, перезапрашиваем
            tracing::debug!(
                "Page {} out of range for total {}, clamped to {}",
                page_no,
                page.total_count,
                self.state.pagination.page_no()
            );
            self.state.dedup.invalidate();
            self.pending = true;
            return false;
        }

        let signature = PageSignature::new(&page.records, page.total_count, page_no, &spec);
        self.state.dedup.offer(signature, page.records, page.total_count)
    }

    fn merge_continuous(&mut self, page: LogPage) -> bool {
        let appended = self.state.buffer.merge(page.records);
        if !appended.is_empty() {
            tracing::debug!(
                "Merged {} new records, cursor {:?}",
                appended.len(),
                self.state.buffer.cursor()
            );
        }
        !appended.is_empty()
    }

    /// Один полный цикл: запрос, выборка, слияние
    pub async fn tick(&mut self, source: &dyn RemoteLogSource) -> Option<FetchOutcome> {
        let ticket = self.request_fetch()?;
        let result = executor::execute(source, &ticket.request).await;
        Some(self.complete_fetch(ticket, result))
    }

    pub fn view(&self) -> RenderView {
        let (records, page) = match self.settings.mode {
            SyncMode::Paged => {
                let total = self.state.dedup.render_total_count();
                (
                    self.state.dedup.render_set().to_vec(),
                    Some(self.state.pagination.page_info(total)),
                )
            }
            SyncMode::Continuous => (self.state.buffer.present(self.settings.display_limit), None),
        };

        RenderView {
            target: self.state.target.to_string(),
            mode: self.settings.mode,
            records,
            page,
            phase: self.phase,
            last_error: self.last_error.clone(),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{record, ScriptedSource};
    use super::*;
    use contracts::enums::{LogCategory, LogType, SortOrder};

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn target(address: &str) -> SyncTarget {
        SyncTarget::parse(address).unwrap()
    }

    fn paged(page_size: u32) -> SyncScheduler {
        SyncScheduler::new(
            target("192.168.0.240"),
            FilterSpec::default(),
            SchedulerSettings::paged(page_size),
        )
        .with_clock(fixed_today)
    }

    fn continuous() -> SyncScheduler {
        SyncScheduler::new(
            target("192.168.0.240"),
            FilterSpec::default(),
            SchedulerSettings::continuous(100, 300, 10_000),
        )
        .with_clock(fixed_today)
    }

    fn page_of(times: &[&str]) -> Vec<contracts::shared::log_record::LogRecord> {
        times
            .iter()
            .map(|t| record(t, LogType::Info, &format!("msg {}", t)))
            .collect()
    }

    #[tokio::test]
    async fn test_empty_total_renders_no_records() {
        let source = ScriptedSource::new();
        source.push_page(vec![], 0);

        let mut scheduler = paged(50);
        let outcome = scheduler.tick(&source).await;

        assert_eq!(outcome, Some(FetchOutcome::Applied { changed: true }));
        let view = scheduler.view();
        assert!(view.is_empty());
        assert_eq!(scheduler.state().pagination.max_page(), 0);
        assert_eq!(view.page.unwrap().total_pages, 1);
        assert_eq!(view.phase, SyncPhase::Idle);
    }

    #[tokio::test]
    async fn test_identical_refresh_does_not_change_view() {
        let source = ScriptedSource::new();
        let records = page_of(&["2024-01-01T10:00:02", "2024-01-01T10:00:01"]);
        source.push_page(records.clone(), 2);
        source.push_page(records.clone(), 2);
        source.push_page(page_of(&["2024-01-01T10:00:03"]), 3);

        let mut scheduler = paged(50);
        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Applied { changed: true }));
        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Applied { changed: false }));
        assert_eq!(scheduler.view().records, records);
        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Applied { changed: true }));
        assert_eq!(scheduler.view().records.len(), 1);
    }

    #[tokio::test]
    async fn test_request_uses_filter_and_page() {
        let source = ScriptedSource::new();
        source.push_page(page_of(&["2024-01-01T10:00:00"]), 120);
        source.push_page(page_of(&["2024-01-01T09:00:00"]), 120);

        let mut scheduler = paged(50);
        scheduler
            .apply(UserAction::SetCategories {
                categories: [LogCategory::Network].into_iter().collect(),
            })
            .unwrap();
        scheduler.tick(&source).await;
        scheduler.apply(UserAction::NextPage).unwrap();
        scheduler.tick(&source).await;

        let calls = source.calls();
        assert_eq!(calls[0].page_no, 0);
        assert_eq!(calls[0].page_size, 50);
        assert_eq!(calls[0].order, SortOrder::Desc);
        assert_eq!(calls[0].category_param, "4,6");
        assert_eq!(calls[1].page_no, 1);
        assert_eq!(scheduler.view().page.unwrap().page_no, 1);
    }

    #[tokio::test]
    async fn test_shrinking_total_clamps_page_and_refetches() {
        let source = ScriptedSource::new();
        source.push_page(page_of(&["2024-01-01T10:00:00"]), 250);
        source.push_page(page_of(&["2024-01-01T08:00:00"]), 250);
        source.push_page(vec![], 60);
        source.push_page(page_of(&["2024-01-01T07:00:00"]), 60);

        let mut scheduler = paged(50);
        scheduler.tick(&source).await;
        scheduler.apply(UserAction::GoToPage { page_no: 2 }).unwrap();
        scheduler.tick(&source).await;
        let before = scheduler.view().records;

        // total shrinks to 60 -> max page 1
        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Applied { changed: false }));
        assert_eq!(scheduler.state().pagination.page_no(), 1);
        assert_eq!(scheduler.view().records, before);
        assert!(scheduler.take_pending());

        scheduler.tick(&source).await;
        assert_eq!(source.calls().last().unwrap().page_no, 1);
        assert_eq!(scheduler.view().records[0].time_iso, "2024-01-01T07:00:00");
    }

    #[tokio::test]
    async fn test_failure_keeps_last_good_view() {
        let source = ScriptedSource::new();
        let records = page_of(&["2024-01-01T10:00:00"]);
        source.push_page(records.clone(), 1);
        source.push(Err(SyncError::Transport("connection refused".into())));
        source.push(Err(SyncError::Protocol("missing data".into())));
        source.push_page(records.clone(), 1);

        let mut scheduler = paged(50);
        scheduler.tick(&source).await;

        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Failed));
        let view = scheduler.view();
        assert_eq!(view.phase, SyncPhase::Failed);
        assert_eq!(view.records, records);
        assert!(view.last_error.unwrap().contains("connection refused"));

        // Failed -> Fetching on the next trigger, no backoff
        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Failed));
        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Applied { changed: false }));
        assert_eq!(scheduler.phase(), SyncPhase::Idle);
        assert_eq!(scheduler.last_error(), None);
    }

    #[test]
    fn test_trigger_during_fetch_is_coalesced() {
        let mut scheduler = paged(50);
        let ticket = scheduler.request_fetch().unwrap();
        assert_eq!(scheduler.phase(), SyncPhase::Fetching);

        assert!(scheduler.request_fetch().is_none());
        assert!(scheduler.request_fetch().is_none());

        scheduler.complete_fetch(ticket, Ok(LogPage::default()));
        assert!(scheduler.take_pending());
        assert!(!scheduler.take_pending());
        assert!(scheduler.request_fetch().is_some());
    }

    #[test]
    fn test_stale_result_after_target_change_is_discarded() {
        let mut scheduler = paged(50);
        let ticket_a = scheduler.request_fetch().unwrap();

        scheduler
            .apply(UserAction::SetTarget {
                address: "192.168.0.241".into(),
            })
            .unwrap();
        assert_eq!(scheduler.phase(), SyncPhase::Idle);

        let outcome = scheduler.complete_fetch(
            ticket_a,
            Ok(LogPage {
                records: page_of(&["2024-01-01T10:00:00"]),
                total_count: 1,
            }),
        );
        assert_eq!(outcome, FetchOutcome::Discarded);

        let view = scheduler.view();
        assert_eq!(view.target, "192.168.0.241");
        assert!(view.is_empty());
        assert_eq!(view.page.unwrap().total_count, 0);

        let ticket_b = scheduler.request_fetch().unwrap();
        match ticket_b.request {
            FetchRequest::Page { target, .. } => assert_eq!(target.address(), "192.168.0.241"),
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_target_change_resets_all_state() {
        let source = ScriptedSource::new();
        source.push_page(page_of(&["2024-01-01T10:00:00"]), 200);

        let mut scheduler = paged(50);
        scheduler.tick(&source).await;
        scheduler.apply(UserAction::GoToPage { page_no: 3 }).unwrap();
        assert_eq!(scheduler.state().pagination.page_no(), 3);

        scheduler
            .apply(UserAction::SetTarget {
                address: "10.0.0.5:8080".into(),
            })
            .unwrap();
        assert_eq!(scheduler.state().pagination.page_no(), 0);
        assert!(scheduler.view().is_empty());
    }

    #[test]
    fn test_invalid_target_is_rejected_without_reset() {
        let mut scheduler = paged(50);
        let generation = scheduler.generation();

        let err = scheduler
            .apply(UserAction::SetTarget {
                address: "http://bad/".into(),
            })
            .unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
        assert_eq!(scheduler.generation(), generation);
        assert_eq!(scheduler.view().target, "192.168.0.240");
        assert!(scheduler.view().last_error.is_some());
    }

    #[test]
    fn test_same_target_is_not_a_change() {
        let mut scheduler = paged(50);
        scheduler
            .apply(UserAction::SetTarget {
                address: " 192.168.0.240 ".into(),
            })
            .unwrap();
        assert_eq!(scheduler.generation(), 0);
    }

    #[tokio::test]
    async fn test_filter_change_resets_page_and_cursor() {
        let source = ScriptedSource::new();
        source.push_page(page_of(&["2024-01-01T10:00:00"]), 1);
        source.push_page(page_of(&["2024-01-01T10:00:00"]), 1);

        let mut scheduler = continuous();
        scheduler.tick(&source).await;
        assert_eq!(scheduler.state().buffer.cursor(), Some("2024-01-01T10:00:00"));

        let in_flight = scheduler.request_fetch().unwrap();
        scheduler
            .apply(UserAction::SetTypes {
                types: [LogType::Error].into_iter().collect(),
            })
            .unwrap();
        assert_eq!(scheduler.state().buffer.cursor(), None);
        assert!(scheduler.view().is_empty());
        assert_eq!(
            scheduler.complete_fetch(in_flight, Ok(LogPage::default())),
            FetchOutcome::Discarded
        );
        assert_eq!(scheduler.phase(), SyncPhase::Idle);
        assert!(!scheduler.is_fetching());
    }

    #[test]
    fn test_discard_leaves_pending_refetch_for_new_target() {
        let mut scheduler = paged(50);
        let stale = scheduler.request_fetch().unwrap();
        scheduler
            .apply(UserAction::SetTarget {
                address: "192.168.0.241".into(),
            })
            .unwrap();
        assert!(scheduler.request_fetch().is_none());

        assert_eq!(
            scheduler.complete_fetch(stale, Ok(LogPage::default())),
            FetchOutcome::Discarded
        );
        assert_eq!(scheduler.phase(), SyncPhase::Idle);
        assert!(!scheduler.is_fetching());

        assert!(scheduler.take_pending());
        assert!(scheduler.request_fetch().is_some());
        assert_eq!(scheduler.phase(), SyncPhase::Fetching);
    }

    #[tokio::test]
    async fn test_target_change_resets_continuous_buffer() {
        let source = ScriptedSource::new();
        source.push_page(vec![], 2);
        source.push_page(page_of(&["2024-01-01T10:00:00", "2024-01-01T10:00:01"]), 2);

        let mut scheduler = continuous();
        scheduler.tick(&source).await;
        assert_eq!(scheduler.state().buffer.len(), 2);
        assert_eq!(scheduler.state().buffer.cursor(), Some("2024-01-01T10:00:01"));
        let generation = scheduler.generation();

        scheduler
            .apply(UserAction::SetTarget {
                address: "10.0.0.5:8080".into(),
            })
            .unwrap();

        let state = scheduler.state();
        assert_eq!(state.buffer.cursor(), None);
        assert_eq!(state.buffer.len(), 0);
        assert!(scheduler.generation() > generation);
        let view = scheduler.view();
        assert!(view.is_empty());
        assert_eq!(view.target, "10.0.0.5:8080");
    }

    #[tokio::test]
    async fn test_page_change_invalidates_signature() {
        let source = ScriptedSource::new();
        let records = page_of(&["2024-01-01T10:00:00"]);
        source.push_page(records.clone(), 120);
        source.push_page(records.clone(), 120);

        let mut scheduler = paged(50);
        scheduler.tick(&source).await;
        scheduler.apply(UserAction::NextPage).unwrap();
        // same content on another page still counts as a change
        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Applied { changed: true }));
    }

    #[tokio::test]
    async fn test_continuous_merges_only_newer_records() {
        let source = ScriptedSource::new();
        // initial pull: count request + one page
        source.push_page(vec![], 1);
        source.push_page(page_of(&["2024-01-01T10:00:00"]), 1);
        // next pull: count request + one page with old, equal and new records
        source.push_page(vec![], 3);
        source.push_page(
            page_of(&[
                "2024-01-01T09:59:00",
                "2024-01-01T10:00:00",
                "2024-01-01T10:01:00",
            ]),
            3,
        );

        let mut scheduler = continuous();
        scheduler.tick(&source).await;
        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Applied { changed: true }));

        let state = scheduler.state();
        assert_eq!(state.buffer.cursor(), Some("2024-01-01T10:01:00"));
        assert_eq!(state.buffer.len(), 2);

        let view = scheduler.view();
        assert!(view.page.is_none());
        assert_eq!(view.records[0].time_iso, "2024-01-01T10:01:00");

        let calls = source.calls();
        assert_eq!((calls[0].page_no, calls[0].page_size), (0, 1));
        assert_eq!((calls[1].page_no, calls[1].page_size), (0, 100));
        assert!(calls.iter().all(|c| c.order == SortOrder::Asc));
    }

    #[tokio::test]
    async fn test_continuous_pulls_every_page() {
        let source = ScriptedSource::new();
        let mut scheduler = SyncScheduler::new(
            target("192.168.0.240"),
            FilterSpec::default(),
            SchedulerSettings::continuous(2, 10, 100),
        )
        .with_clock(fixed_today);

        source.push_page(vec![], 5);
        source.push_page(page_of(&["2024-01-01T10:00:01", "2024-01-01T10:00:02"]), 5);
        source.push_page(page_of(&["2024-01-01T10:00:03", "2024-01-01T10:00:04"]), 5);
        source.push_page(page_of(&["2024-01-01T10:00:05"]), 5);

        scheduler.tick(&source).await;
        let pages: Vec<u32> = source.calls().iter().map(|c| c.page_no).collect();
        assert_eq!(pages, vec![0, 0, 1, 2]);
        assert_eq!(scheduler.state().buffer.len(), 5);
    }

    #[tokio::test]
    async fn test_continuous_failure_mid_pull_keeps_buffer() {
        let source = ScriptedSource::new();
        source.push_page(vec![], 1);
        source.push_page(page_of(&["2024-01-01T10:00:00"]), 1);
        source.push_page(vec![], 150);
        source.push_page(page_of(&["2024-01-01T10:00:05"]), 150);
        source.push(Err(SyncError::Transport("timeout".into())));

        let mut scheduler = continuous();
        scheduler.tick(&source).await;
        assert_eq!(scheduler.tick(&source).await, Some(FetchOutcome::Failed));
        assert_eq!(scheduler.state().buffer.len(), 1);
        assert_eq!(scheduler.state().buffer.cursor(), Some("2024-01-01T10:00:00"));
    }

    #[tokio::test]
    async fn test_order_change_ignored_in_continuous_mode() {
        let source = ScriptedSource::new();
        source.push_page(vec![], 1);
        source.push_page(page_of(&["2024-01-01T10:00:00"]), 1);

        let mut scheduler = continuous();
        scheduler.tick(&source).await;
        let generation = scheduler.generation();

        scheduler
            .apply(UserAction::SetOrder {
                order: SortOrder::Desc,
            })
            .unwrap();
        assert_eq!(scheduler.generation(), generation);
        assert_eq!(scheduler.state().buffer.cursor(), Some("2024-01-01T10:00:00"));
        assert_eq!(scheduler.state().buffer.len(), 1);
    }

    #[test]
    fn test_order_change_applies_in_paged_mode() {
        let mut scheduler = paged(50);
        scheduler
            .apply(UserAction::SetOrder {
                order: SortOrder::Asc,
            })
            .unwrap();
        assert_eq!(scheduler.generation(), 1);
        assert_eq!(scheduler.state().filter.order, SortOrder::Asc);
    }

    #[test]
    fn test_navigation_ignored_in_continuous_mode() {
        let mut scheduler = continuous();
        scheduler.apply(UserAction::NextPage).unwrap();
        assert_eq!(scheduler.generation(), 0);
    }
}
