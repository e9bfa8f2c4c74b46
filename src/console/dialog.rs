use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::{mpsc, oneshot};

use crate::{
    picker::{DatePicker, TimePicker},
    screen::StatusMessage,
    status::StatusSink,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// A dialog waiting for the next line the user types.
pub struct PromptRequest {
    pub prompt: String,
    pub reply: oneshot::Sender<String>,
}

#[derive(Clone)]
pub struct PromptSender(mpsc::UnboundedSender<PromptRequest>);

impl PromptSender {
    pub fn new(inner: mpsc::UnboundedSender<PromptRequest>) -> Self {
        Self(inner)
    }

    /// Resolves to `None` if the console drops the dialog without an answer.
    pub async fn ask(&self, prompt: String) -> Option<String> {
        let (reply, answer) = oneshot::channel();
        self.0.send(PromptRequest { prompt, reply }).ok()?;
        answer.await.ok()
    }
}

pub struct ConsoleDatePicker {
    prompts: PromptSender,
}

impl ConsoleDatePicker {
    pub fn new(prompts: PromptSender) -> Self {
        Self { prompts }
    }
}

#[async_trait]
impl DatePicker for ConsoleDatePicker {
    async fn pick_date(&self, initial: NaiveDate) -> Option<NaiveDate> {
        let prompt = format!(
            "Pick date (YYYY-MM-DD) [{}]: ",
            initial.format(DATE_FORMAT)
        );
        let answer = self.prompts.ask(prompt).await?;
        parse_date_answer(&answer, initial)
    }
}

pub struct ConsoleTimePicker {
    prompts: PromptSender,
}

impl ConsoleTimePicker {
    pub fn new(prompts: PromptSender) -> Self {
        Self { prompts }
    }
}

#[async_trait]
impl TimePicker for ConsoleTimePicker {
    async fn pick_time(&self, initial: NaiveTime) -> Option<NaiveTime> {
        let prompt = format!("Pick time (HH:MM) [{}]: ", initial.format(TIME_FORMAT));
        let answer = self.prompts.ask(prompt).await?;
        parse_time_answer(&answer, initial)
    }
}

/// Empty answer accepts the initial value, anything unparsable dismisses.
fn parse_date_answer(answer: &str, initial: NaiveDate) -> Option<NaiveDate> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(initial);
    }

    match NaiveDate::parse_from_str(answer, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            log::debug!("Could not parse date \"{answer}\", dismissing. {e}");
            None
        }
    }
}

fn parse_time_answer(answer: &str, initial: NaiveTime) -> Option<NaiveTime> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(initial);
    }

    match NaiveTime::parse_from_str(answer, TIME_FORMAT) {
        Ok(time) => Some(time),
        Err(e) => {
            log::debug!("Could not parse time \"{answer}\", dismissing. {e}");
            None
        }
    }
}

/// Forwards status messages to the console loop, which owns the output.
pub struct ConsoleStatusSink {
    lines: mpsc::UnboundedSender<String>,
}

impl ConsoleStatusSink {
    pub fn new(lines: mpsc::UnboundedSender<String>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl StatusSink for ConsoleStatusSink {
    async fn show(&self, message: &StatusMessage) {
        let _ = self.lines.send(format!(">> {}", message.text()));
    }

    async fn hide(&self, message: &StatusMessage) {
        log::trace!("Status message \"{}\" expired", message.text());
    }
}
