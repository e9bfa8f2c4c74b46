use crate::reminder::Reminder;

use super::ScreenSnapshot;

const CONTROLS: &str = "[Pick Date] [Pick Time] [Set Reminder] [Clear Reminder]";

pub fn render_screen(snapshot: &ScreenSnapshot) -> String {
    let draft = &snapshot.draft;
    let mut output = format!(
        "Reminder Text: {}\nSelected Date: {}    Selected Time: {}\n{CONTROLS}\n",
        draft.text,
        draft.formatted_date(),
        draft.formatted_time()
    );

    for reminder in &snapshot.reminders {
        output.push('\n');
        output.push_str(&render_reminder(reminder));
        output.push('\n');
    }

    output
}

pub fn render_reminder(reminder: &Reminder) -> String {
    format!("{}\n- {} @ {}", reminder.text, reminder.date, reminder.time)
}
