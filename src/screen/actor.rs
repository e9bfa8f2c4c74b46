use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::{oneshot, watch};

use crate::{
    actor::{self, Actor, ActorContext, ActorHandle, ActorReference, ActorStatus},
    picker::{Clock, DatePicker, TimePicker},
    reminder::{ReminderDate, ReminderTime},
    status::StatusNotifier,
};

use super::{ReminderScreen, ScreenSnapshot};

/// Resolved once a pick has been applied to the draft, or the picker was dismissed.
pub type PickApplied = oneshot::Receiver<()>;

#[derive(Debug)]
pub enum ScreenMessage {
    SetText(String),
    PickDate(oneshot::Sender<()>),
    DatePicked {
        date: NaiveDate,
        applied: oneshot::Sender<()>,
    },
    PickTime(oneshot::Sender<()>),
    TimePicked {
        time: NaiveTime,
        applied: oneshot::Sender<()>,
    },
    Commit,
    Clear,
    Shutdown,
}

pub struct ScreenActorArgs {
    pub date_picker: Arc<dyn DatePicker>,
    pub time_picker: Arc<dyn TimePicker>,
    pub clock: Arc<dyn Clock>,
    pub status: StatusNotifier,
    pub snapshots: watch::Sender<ScreenSnapshot>,
}

pub struct ScreenActorState {
    screen: ReminderScreen,
    date_picker: Arc<dyn DatePicker>,
    time_picker: Arc<dyn TimePicker>,
    clock: Arc<dyn Clock>,
    status: StatusNotifier,
    snapshots: watch::Sender<ScreenSnapshot>,
}

impl ScreenActorState {
    fn publish(&self) {
        self.snapshots.send_replace(self.screen.snapshot());
    }
}

/// Owns the screen state. Every transition, picker results included, runs on
/// this actor's task.
pub struct ScreenActor;

#[async_trait]
impl Actor for ScreenActor {
    type Message = ScreenMessage;
    type State = ScreenActorState;
    type InitArgs = ScreenActorArgs;

    fn handle_message(
        msg: Self::Message,
        mut state: Self::State,
        context: &ActorContext<Self>,
    ) -> anyhow::Result<ActorStatus<Self::State>> {
        match msg {
            ScreenMessage::SetText(text) => {
                state.screen.set_text(text);
                state.publish();
            }
            ScreenMessage::PickDate(applied) => {
                let picker = Arc::clone(&state.date_picker);
                let initial = state.clock.now().date();
                let self_ref = context.self_ref.clone();

                tokio::spawn(async move {
                    match picker.pick_date(initial).await {
                        Some(date) => deliver(&self_ref, ScreenMessage::DatePicked { date, applied }),
                        None => {
                            log::debug!("Date picker dismissed");
                            let _ = applied.send(());
                        }
                    }
                });
            }
            ScreenMessage::DatePicked { date, applied } => {
                state.screen.set_date(ReminderDate::new(date));
                state.publish();
                let _ = applied.send(());
            }
            ScreenMessage::PickTime(applied) => {
                let picker = Arc::clone(&state.time_picker);
                let initial = state.clock.now().time();
                let self_ref = context.self_ref.clone();

                tokio::spawn(async move {
                    match picker.pick_time(initial).await {
                        Some(time) => deliver(&self_ref, ScreenMessage::TimePicked { time, applied }),
                        None => {
                            log::debug!("Time picker dismissed");
                            let _ = applied.send(());
                        }
                    }
                });
            }
            ScreenMessage::TimePicked { time, applied } => {
                state.screen.set_time(ReminderTime::new(time));
                state.publish();
                let _ = applied.send(());
            }
            ScreenMessage::Commit => match state.screen.commit() {
                Ok(status) => {
                    log::info!("{}", status.text());
                    state.publish();
                    state.status.notify(status);
                }
                Err(e) => log::debug!("Reminder was not set. {e}"),
            },
            ScreenMessage::Clear => {
                let status = state.screen.clear();
                log::info!("Cleared reminders");
                state.publish();
                state.status.notify(status);
            }
            ScreenMessage::Shutdown => {
                log::info!("Closing reminder screen");
                return Ok(ActorStatus::Stop);
            }
        }

        Ok(ActorStatus::Continue(state))
    }

    async fn init_state(args: Self::InitArgs) -> anyhow::Result<Self::State> {
        let state = ScreenActorState {
            screen: ReminderScreen::new(),
            date_picker: args.date_picker,
            time_picker: args.time_picker,
            clock: args.clock,
            status: args.status,
            snapshots: args.snapshots,
        };
        state.publish();

        Ok(state)
    }
}

fn deliver(self_ref: &ActorReference<ScreenActor>, msg: ScreenMessage) {
    if let Err(e) = self_ref.send_message(msg) {
        log::warn!("Picker result arrived after the screen was closed. {e}");
    }
}

/// Handle used by front-ends to drive the screen.
#[derive(Clone)]
pub struct ScreenController {
    actor: ActorReference<ScreenActor>,
    snapshots: watch::Receiver<ScreenSnapshot>,
}

impl ScreenController {
    pub async fn start(
        date_picker: Arc<dyn DatePicker>,
        time_picker: Arc<dyn TimePicker>,
        clock: Arc<dyn Clock>,
        status: StatusNotifier,
    ) -> anyhow::Result<(Self, ActorHandle<ScreenActor>)> {
        let (snapshots_tx, snapshots) = watch::channel(ScreenSnapshot::default());
        let args = ScreenActorArgs {
            date_picker,
            time_picker,
            clock,
            status,
            snapshots: snapshots_tx,
        };

        let handle = actor::start::<ScreenActor>(args).await?;
        let controller = Self {
            actor: handle.actor_reference().clone(),
            snapshots,
        };

        Ok((controller, handle))
    }

    pub fn set_text(&self, text: impl Into<String>) -> anyhow::Result<()> {
        self.actor.send_message(ScreenMessage::SetText(text.into()))
    }

    /// Opens the date picker. The returned receiver resolves after the picked
    /// date is in the draft, so later actions observe it.
    pub fn pick_date(&self) -> anyhow::Result<PickApplied> {
        let (applied, pick_applied) = oneshot::channel();
        self.actor.send_message(ScreenMessage::PickDate(applied))?;
        Ok(pick_applied)
    }

    pub fn pick_time(&self) -> anyhow::Result<PickApplied> {
        let (applied, pick_applied) = oneshot::channel();
        self.actor.send_message(ScreenMessage::PickTime(applied))?;
        Ok(pick_applied)
    }

    pub fn commit(&self) -> anyhow::Result<()> {
        self.actor.send_message(ScreenMessage::Commit)
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.actor.send_message(ScreenMessage::Clear)
    }

    pub fn shutdown(&self) -> anyhow::Result<()> {
        self.actor.send_message(ScreenMessage::Shutdown)
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenSnapshot> {
        self.snapshots.clone()
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> ScreenSnapshot {
        self.snapshots.borrow().clone()
    }
}
