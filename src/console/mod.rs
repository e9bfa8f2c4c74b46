mod command;
mod dialog;

use std::sync::Arc;

use command::{Command, HELP};
use dialog::{
    ConsoleDatePicker, ConsoleStatusSink, ConsoleTimePicker, PromptRequest, PromptSender,
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::{mpsc, oneshot},
};

use crate::{
    appsettings::ScreenSettings,
    picker::Clock,
    screen::{PickApplied, ScreenController, ScreenSnapshot, render::render_screen},
    status::StatusNotifier,
};

const SEPARATOR: &str = "----------------------------------------";

/// Terminal rendition of the reminder screen. Reads commands line by line and
/// prints the whole screen after every change.
pub struct ConsoleScreen {
    settings: ScreenSettings,
    clock: Arc<dyn Clock>,
}

impl ConsoleScreen {
    pub fn new(settings: ScreenSettings, clock: Arc<dyn Clock>) -> Self {
        Self { settings, clock }
    }

    pub async fn run<R, W>(self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (prompt_tx, mut prompts) = mpsc::unbounded_channel();
        let (status_tx, mut status_lines) = mpsc::unbounded_channel();
        let prompt_sender = PromptSender::new(prompt_tx);

        let (status, status_task) = StatusNotifier::spawn(
            Arc::new(ConsoleStatusSink::new(status_tx)),
            self.settings.status_display_duration(),
        );
        let (controller, screen) = ScreenController::start(
            Arc::new(ConsoleDatePicker::new(prompt_sender.clone())),
            Arc::new(ConsoleTimePicker::new(prompt_sender)),
            self.clock,
            status.clone(),
        )
        .await?;

        log::info!("Reminder screen opened");

        let mut snapshots = controller.subscribe();
        let mut rendered = snapshots.borrow_and_update().clone();
        write_screen(&mut writer, &rendered).await?;

        let mut lines = reader.lines();
        let mut open_dialog: Option<OpenDialog> = None;

        loop {
            tokio::select! {
                biased;

                Some(line) = status_lines.recv() => write_line(&mut writer, &line).await?,

                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    rendered = snapshots.borrow_and_update().clone();
                    write_screen(&mut writer, &rendered).await?;
                }

                line = lines.next_line() => {
                    let Some(line) = line? else {
                        log::info!("Input closed");
                        break;
                    };

                    if let Some(dialog) = open_dialog.take() {
                        let _ = dialog.reply.send(line);
                        // Input after the answer must see the picked value.
                        let _ = dialog.applied.await;
                    } else {
                        let Some(command) = Command::parse(&line) else {
                            write_line(&mut writer, "Unknown command. Type help to see supported commands.").await?;
                            continue;
                        };

                        match command {
                            Command::Text(text) => controller.set_text(text)?,
                            Command::PickDate => {
                                let applied = controller.pick_date()?;
                                open_dialog = show_dialog(&mut writer, prompts.recv().await, applied).await?;
                            }
                            Command::PickTime => {
                                let applied = controller.pick_time()?;
                                open_dialog = show_dialog(&mut writer, prompts.recv().await, applied).await?;
                            }
                            Command::SetReminder => controller.commit()?,
                            Command::ClearReminders => controller.clear()?,
                            Command::Help => write_line(&mut writer, HELP).await?,
                            Command::Quit => break,
                        }
                    }
                }
            }
        }

        if let Err(e) = controller.shutdown() {
            log::warn!("Screen was already closed. {e}");
        }
        screen.join().await?;

        let last = snapshots.borrow().clone();
        if last != rendered {
            write_screen(&mut writer, &last).await?;
        }

        status.shutdown();
        status_task.await?;

        while let Ok(line) = status_lines.try_recv() {
            write_line(&mut writer, &line).await?;
        }
        writer.flush().await?;

        log::info!("Reminder screen closed");
        Ok(())
    }
}

/// A picker dialog waiting for its answer line.
struct OpenDialog {
    reply: oneshot::Sender<String>,
    applied: PickApplied,
}

async fn show_dialog<W: AsyncWrite + Unpin>(
    writer: &mut W,
    request: Option<PromptRequest>,
    applied: PickApplied,
) -> anyhow::Result<Option<OpenDialog>> {
    let Some(request) = request else {
        log::warn!("Picker closed before opening a dialog");
        return Ok(None);
    };

    writer.write_all(request.prompt.as_bytes()).await?;
    writer.flush().await?;
    Ok(Some(OpenDialog {
        reply: request.reply,
        applied,
    }))
}

async fn write_screen<W: AsyncWrite + Unpin>(
    writer: &mut W,
    snapshot: &ScreenSnapshot,
) -> anyhow::Result<()> {
    writer.write_all(SEPARATOR.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.write_all(render_screen(snapshot).as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> anyhow::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
