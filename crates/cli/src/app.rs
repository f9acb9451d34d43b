use std::future::Future;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use providers::tutor::TutorService;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tutor_core::llm::{Message, ModelClient, Role};

use crate::{language, render, strings};

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Nothing,
    Ask,
    Say(String),
    Quit,
}

/// In-memory conversation for the interactive tutor.
pub struct App {
    pub topic: String,
    pub messages: Vec<Message>,
}

impl App {
    pub fn new<S: Into<String>>(topic: S) -> Self {
        Self {
            topic: topic.into(),
            messages: Vec::new(),
        }
    }

    // Returns Some if the text was a slash command
    fn try_handle_slash_command(&mut self, text: &str) -> Option<Action> {
        let rest = text.strip_prefix('/')?;
        let mut parts = rest.splitn(2, char::is_whitespace);
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next().unwrap_or("").trim();
        let action = match cmd.as_str() {
            "topic" => {
                if arg.is_empty() {
                    Action::Say(format!("[info] topic is '{}'", self.topic))
                } else {
                    self.topic = arg.to_string();
                    self.messages.clear();
                    Action::Say(strings::topic_changed(&self.topic))
                }
            }
            "clear" => {
                self.messages.clear();
                Action::Say(strings::CLEARED.to_string())
            }
            "help" => Action::Say(strings::HELP.to_string()),
            "quit" | "exit" => Action::Quit,
            other => Action::Say(strings::unknown_command(other)),
        };
        Some(action)
    }

    pub fn submit(&mut self, input: &str) -> Action {
        let text = input.trim();
        if text.is_empty() {
            return Action::Nothing;
        }
        if let Some(action) = self.try_handle_slash_command(text) {
            return action;
        }
        self.messages.push(Message::user(text));
        Action::Ask
    }

    /// Keeps a real answer in the history. An apology is not a turn the
    /// model produced, so the unanswered question is dropped instead.
    pub fn record_reply(&mut self, reply: Result<String, String>) -> Message {
        match reply {
            Ok(answer) => {
                self.messages.push(Message::assistant(answer.clone()));
                Message::assistant(answer)
            }
            Err(apology) => {
                if matches!(self.messages.last(), Some(m) if m.role == Role::User) {
                    self.messages.pop();
                }
                Message::assistant(apology)
            }
        }
    }
}

/// Awaits `fut`, cancelling `cancel` on Ctrl-C. `fut` must observe `cancel`.
async fn cancel_on_ctrl_c<F: Future>(fut: F, cancel: &CancellationToken) -> F::Output {
    tokio::pin!(fut);
    loop {
        tokio::select! {
            out = &mut fut => return out,
            _ = tokio::signal::ctrl_c(), if !cancel.is_cancelled() => {
                info!(target: "cli", "request canceled by user");
                cancel.cancel();
            }
        }
    }
}

fn print_message(m: &Message) {
    for line in render::wrap_message(m, render::terminal_width()) {
        println!("{}", line);
    }
}

pub async fn run_chat<C: ModelClient>(svc: &TutorService<C>, topic: String) -> Result<()> {
    let mut app = App::new(topic);
    println!("{}", strings::welcome(&app.topic));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", strings::PROMPT);
        std::io::stdout().flush().ok();
        let line = tokio::select! {
            l = lines.next_line() => l.context("read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            break;
        };
        match app.submit(&line) {
            Action::Nothing => {}
            Action::Say(s) => println!("{}", s),
            Action::Quit => break,
            Action::Ask => {
                info!(target: "cli", "ask topic={} turns={}", app.topic, app.messages.len());
                println!("{}", strings::THINKING);
                let cancel = CancellationToken::new();
                let reply = cancel_on_ctrl_c(
                    svc.tutor_reply_with_cancel(&app.messages, &app.topic, &cancel),
                    &cancel,
                )
                .await;
                let shown = app.record_reply(reply);
                print_message(&shown);
            }
        }
    }
    Ok(())
}

pub async fn run_review<C: ModelClient>(
    svc: &TutorService<C>,
    path: &Path,
    language: Option<String>,
) -> Result<()> {
    let language = match language {
        Some(l) => l,
        None => language::from_path(path)
            .map(str::to_string)
            .with_context(|| {
                format!(
                    "cannot infer language of {}, pass --language (one of: {})",
                    path.display(),
                    language::SUPPORTED.join(", ")
                )
            })?,
    };
    let code = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read source file: {}", path.display()))?;
    println!("{}", strings::review_header(&path.display().to_string(), &language));
    println!("{}", strings::THINKING);
    info!(target: "cli", "review path={} language={} bytes={}", path.display(), language, code.len());
    let cancel = CancellationToken::new();
    let feedback = cancel_on_ctrl_c(
        svc.generate_code_feedback_with_cancel(&code, &language, &cancel),
        &cancel,
    )
    .await;
    print_message(&Message::assistant(feedback));
    Ok(())
}
