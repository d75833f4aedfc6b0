use contracts::usecases::u601_log_sync::RenderView;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use super::commands::{OperatorCommand, HELP};
use super::console::Renderer;
use crate::usecases::u601_log_sync::executor;
use crate::usecases::u601_log_sync::{FetchOutcome, RemoteLogSource, SyncScheduler};

pub type CommandReceiver = mpsc::Receiver<Result<OperatorCommand, String>>;

enum Flow {
    Continue { fetch: bool },
    Quit,
}

/// Воркер сессии: превращает тики таймера и команды оператора в циклы
/// планировщика и отдает вид слою отображения.
///
/// Команды, пришедшие во время выборки, применяются сразу (смена
/// параметров делает выборку устаревшей), а повторная выборка
/// выполняется после завершения текущей.
pub struct SyncWorker {
    scheduler: SyncScheduler,
    source: Arc<dyn RemoteLogSource>,
    renderer: Box<dyn Renderer>,
    interval: Duration,
    session_id: String,
    last_view: Option<RenderView>,
}

impl SyncWorker {
    pub fn new(
        scheduler: SyncScheduler,
        source: Arc<dyn RemoteLogSource>,
        renderer: Box<dyn Renderer>,
        interval: Duration,
    ) -> Self {
        Self {
            scheduler,
            source,
            renderer,
            interval,
            session_id: Uuid::new_v4().to_string(),
            last_view: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Запускает цикл до команды `quit`
    pub async fn run_loop(mut self, mut commands: CommandReceiver) -> SyncScheduler {
        info!(
            "Log viewer session {} started: target {}, {} mode, refresh every {:?}",
            self.session_id,
            self.scheduler.state().target,
            self.scheduler.mode(),
            self.interval
        );
        // первый тик через полный интервал: стартовая выборка идет сразу ниже
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut commands_open = true;

        self.present();

        let mut flow = self
            .run_fetch_cycle(&mut ticker, &mut commands, &mut commands_open)
            .await;

        while !matches!(flow, Flow::Quit) {
            flow = tokio::select! {
                biased;
                _ = ticker.tick() => Flow::Continue { fetch: true },
                command = commands.recv(), if commands_open => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        commands_open = false;
                        Flow::Continue { fetch: false }
                    }
                },
            };

            if let Flow::Continue { fetch: true } = flow {
                flow = self
                    .run_fetch_cycle(&mut ticker, &mut commands, &mut commands_open)
                    .await;
            }
        }

        info!("Log viewer session {} stopped", self.session_id);
        self.scheduler
    }

    /// Выборка и все отложенные повторы. Пока выборка в полете, тики и
    /// команды только взводят `pending`.
    async fn run_fetch_cycle(
        &mut self,
        ticker: &mut Interval,
        commands: &mut CommandReceiver,
        commands_open: &mut bool,
    ) -> Flow {
        loop {
            let Some(ticket) = self.scheduler.request_fetch() else {
                return Flow::Continue { fetch: false };
            };

            let source = Arc::clone(&self.source);
            let request = ticket.request.clone();
            let fetch = async move { executor::execute(source.as_ref(), &request).await };
            tokio::pin!(fetch);

            let result = loop {
                tokio::select! {
                    biased;
                    result = &mut fetch => break result,
                    command = commands.recv(), if *commands_open => match command {
                        Some(command) => match self.handle_command(command) {
                            Flow::Quit => return Flow::Quit,
                            Flow::Continue { fetch: true } => {
                                let _ = self.scheduler.request_fetch();
                            }
                            Flow::Continue { fetch: false } => {}
                        },
                        None => *commands_open = false,
                    },
                    _ = ticker.tick() => {
                        let _ = self.scheduler.request_fetch();
                    }
                }
            };

            let outcome = self.scheduler.complete_fetch(ticket, result);
            debug!("Fetch outcome: {:?}", outcome);
            if outcome != FetchOutcome::Discarded {
                self.present();
            }

            if !self.scheduler.take_pending() {
                return Flow::Continue { fetch: false };
            }
        }
    }

    fn handle_command(&mut self, command: Result<OperatorCommand, String>) -> Flow {
        match command {
            Err(message) => {
                self.renderer.notice(&message);
                Flow::Continue { fetch: false }
            }
            Ok(OperatorCommand::Help) => {
                self.renderer.notice(HELP);
                Flow::Continue { fetch: false }
            }
            Ok(OperatorCommand::Quit) => Flow::Quit,
            Ok(OperatorCommand::Action(action)) => {
                debug!("Operator action: {:?}", action);
                match self.scheduler.apply(action) {
                    Ok(()) => {
                        self.present();
                        Flow::Continue { fetch: true }
                    }
                    Err(e) => {
                        self.renderer.notice(&e.to_string());
                        Flow::Continue { fetch: false }
                    }
                }
            }
        }
    }

    /// Перерисовывает, только если вид изменился
    fn present(&mut self) {
        let view = self.scheduler.view();
        if self.last_view.as_ref() == Some(&view) {
            return;
        }
        self.renderer.render(&view);
        self.last_view = Some(view);
    }
}
