use chrono::NaiveDate;
use contracts::enums::{LogCategory, LogType, SortOrder};
use contracts::usecases::u601_log_sync::UserAction;
use std::collections::BTreeSet;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub const HELP: &str = "commands: n|next, p|prev, page N, target ADDR, cat all|a,b, \
type all|a,b, order asc|desc, date FROM [TO]|today, r|refresh, q|quit";

/// Команда оператора из консоли
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorCommand {
    Action(UserAction),
    Help,
    Quit,
}

/// Разбор одной строки. Пустая строка - `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<OperatorCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "n" | "next" => OperatorCommand::Action(UserAction::NextPage),
        "p" | "prev" => OperatorCommand::Action(UserAction::PrevPage),
        "page" => {
            let page: u32 = rest
                .parse()
                .map_err(|_| format!("page number expected, got '{}'", rest))?;
            if page == 0 {
                return Err("pages are numbered from 1".to_string());
            }
            OperatorCommand::Action(UserAction::GoToPage { page_no: page - 1 })
        }
        "target" | "ip" => {
            if rest.is_empty() {
                return Err("target address expected".to_string());
            }
            OperatorCommand::Action(UserAction::SetTarget {
                address: rest.to_string(),
            })
        }
        "cat" | "category" => OperatorCommand::Action(UserAction::SetCategories {
            categories: parse_list(rest, LogCategory::all, LogCategory::from_name, "category")?,
        }),
        "type" => OperatorCommand::Action(UserAction::SetTypes {
            types: parse_list(rest, LogType::all, LogType::from_name, "type")?,
        }),
        "order" => OperatorCommand::Action(UserAction::SetOrder {
            order: SortOrder::from_param(rest).ok_or_else(|| format!("unknown order '{}'", rest))?,
        }),
        "date" => {
            let (date_from, date_to) = parse_date_range(rest)?;
            OperatorCommand::Action(UserAction::SetDateRange { date_from, date_to })
        }
        "r" | "refresh" => OperatorCommand::Action(UserAction::Refresh),
        "h" | "help" | "?" => OperatorCommand::Help,
        "q" | "quit" | "exit" => OperatorCommand::Quit,
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Some(command))
}

fn parse_list<T: Ord>(
    rest: &str,
    all: fn() -> Vec<T>,
    from_name: fn(&str) -> Option<T>,
    what: &str,
) -> Result<BTreeSet<T>, String> {
    if rest.is_empty() || rest.eq_ignore_ascii_case("all") {
        return Ok(all().into_iter().collect());
    }
    rest.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| from_name(name).ok_or_else(|| format!("unknown {} '{}'", what, name)))
        .collect()
}

fn parse_date_range(rest: &str) -> Result<(Option<NaiveDate>, Option<NaiveDate>), String> {
    if rest.is_empty() || rest.eq_ignore_ascii_case("today") {
        return Ok((None, None));
    }
    let parse = |s: &str| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("date YYYY-MM-DD expected, got '{}'", s))
    };
    let mut parts = rest.split_whitespace();
    let from = parts.next().map(parse).transpose()?;
    let to = parts.next().map(parse).transpose()?.or(from);
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(format!("date range {} .. {} is reversed", from, to));
        }
    }
    Ok((from, to))
}

/// Читает команды из stdin построчно и отправляет их воркеру
pub fn spawn_stdin_reader(tx: mpsc::Sender<Result<OperatorCommand, String>>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(Some(command)) => {
                        // после quit не читаем: блокирующее чтение stdin задержит выход
                        let quit = command == OperatorCommand::Quit;
                        if tx.send(Ok(command)).await.is_err() || quit {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(message) => {
                        if tx.send(Err(message)).await.is_err() {
                            break;
                        }
                    }
                },
                Ok(None) => {
                    tracing::info!("stdin closed, operator commands disabled");
                    break;
                }
                Err(e) => {
                    tracing::error!("Cannot read operator command: {}", e);
                    break;
                }
            }
        }
    });
}
