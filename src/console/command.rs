#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    PickDate,
    PickTime,
    SetReminder,
    ClearReminders,
    Help,
    Quit,
}

pub const HELP: &str = "These commands are supported:
text <words>  replace the reminder text (empty clears it)
date          pick a date
time          pick a time
set           set the reminder
clear         clear all reminders
help          show this message
quit          close the screen";

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (name, rest) = match line.trim_start().split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest)),
            None => (line.trim(), None),
        };

        let command = match name.to_lowercase().as_str() {
            "text" => Command::Text(rest.unwrap_or_default().to_string()),
            "date" => Command::PickDate,
            "time" => Command::PickTime,
            "set" => Command::SetReminder,
            "clear" => Command::ClearReminders,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return None,
        };

        Some(command)
    }
}
