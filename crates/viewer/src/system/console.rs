use contracts::usecases::u601_log_sync::{RenderView, SyncPhase};
use std::io::Write;

use crate::shared::format::{format_page_line, format_record_line};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Слой отображения материализованного вида журнала
pub trait Renderer: Send {
    fn render(&mut self, view: &RenderView);

    /// Короткое сообщение оператору (отклоненная команда, подсказка)
    fn notice(&mut self, message: &str);
}

/// Вывод журнала в консоль. Записи типа Error выделяются красным.
pub struct ConsoleRenderer<W: Write + Send> {
    out: W,
    ansi: bool,
}

impl ConsoleRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
            ansi: true,
        }
    }
}

impl<W: Write + Send> ConsoleRenderer<W> {
    pub fn new(out: W, ansi: bool) -> Self {
        Self { out, ansi }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.ansi {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn render_lines(&self, view: &RenderView) -> Vec<String> {
        let mut lines = Vec::with_capacity(view.records.len() + 4);
        lines.push(self.paint(
            CYAN,
            &format!("Connected device: {} ({} mode)", view.target, view.mode),
        ));

        match view.phase {
            SyncPhase::Failed => {
                let error = view.last_error.as_deref().unwrap_or("unknown error");
                lines.push(self.paint(RED, &format!("Log refresh failed: {}", error)));
            }
            SyncPhase::Fetching => lines.push("Refreshing logs...".to_string()),
            SyncPhase::Idle => {}
        }

        if view.records.is_empty() {
            lines.push("No log records to display.".to_string());
        } else {
            for record in &view.records {
                let line = format_record_line(&view.target, record);
                if record.is_error() {
                    lines.push(self.paint(RED, &line));
                } else {
                    lines.push(line);
                }
            }
        }

        if let Some(page) = &view.page {
            let mut line = format_page_line(page);
            let hints: Vec<&str> = [(page.has_prev(), "p: prev"), (page.has_next(), "n: next")]
                .into_iter()
                .filter_map(|(available, hint)| available.then_some(hint))
                .collect();
            if !hints.is_empty() {
                line.push_str("  [");
                line.push_str(&hints.join(", "));
                line.push(']');
            }
            lines.push(line);
        }
        lines
    }
}

impl<W: Write + Send> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, view: &RenderView) {
        let lines = self.render_lines(view);
        let mut text = String::new();
        if self.ansi {
            text.push_str(CLEAR_SCREEN);
        }
        for line in lines {
            text.push_str(&line);
            text.push('\n');
        }
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::error!("Cannot write log view to console: {}", e);
        }
    }

    fn notice(&mut self, message: &str) {
        let line = self.paint(YELLOW, message);
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            tracing::error!("Cannot write notice to console: {}", e);
        }
    }
}
