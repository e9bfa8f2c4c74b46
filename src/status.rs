use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::screen::StatusMessage;

#[async_trait]
pub trait StatusSink: Send + Sync + 'static {
    async fn show(&self, message: &StatusMessage);
    async fn hide(&self, message: &StatusMessage);
}

/// Queues status messages and shows them one at a time. Callers never wait
/// for a message to be displayed.
#[derive(Clone)]
pub struct StatusNotifier {
    tx: mpsc::UnboundedSender<StatusMessage>,
    shutdown: CancellationToken,
}

impl StatusNotifier {
    pub fn spawn(sink: Arc<dyn StatusSink>, display_duration: Duration) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(run_status_queue(
            sink,
            rx,
            display_duration,
            shutdown.child_token(),
        ));

        (Self { tx, shutdown }, task)
    }

    pub fn notify(&self, message: StatusMessage) {
        log::debug!("Queueing status message \"{}\"", message.text());
        if self.tx.send(message).is_err() {
            log::warn!("Status queue is closed, dropping message");
        }
    }

    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

async fn run_status_queue(
    sink: Arc<dyn StatusSink>,
    mut rx: mpsc::UnboundedReceiver<StatusMessage>,
    display_duration: Duration,
    shutdown: CancellationToken,
) {
    // Messages queued before shutdown are still flushed, without the display delay.
    loop {
        let message = tokio::select! {
            biased;
            message = rx.recv() => match message {
                Some(message) => message,
                None => break,
            },
            _ = shutdown.cancelled() => break,
        };

        sink.show(&message).await;

        tokio::select! {
            _ = shutdown.cancelled() => {}
            _ = tokio::time::sleep(display_duration) => {}
        }

        sink.hide(&message).await;
    }

    log::info!("Status queue shutting down");
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::reminder::Reminder;

    const DISPLAY: Duration = Duration::from_secs(4);

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SinkEvent {
        Show(String),
        Hide(String),
    }

    type ReceivedEvents = Arc<Mutex<Vec<SinkEvent>>>;

    struct TestStatusSink {
        events: ReceivedEvents,
    }

    #[async_trait]
    impl StatusSink for TestStatusSink {
        async fn show(&self, message: &StatusMessage) {
            self.events
                .lock()
                .unwrap()
                .push(SinkEvent::Show(message.text().to_string()));
        }

        async fn hide(&self, message: &StatusMessage) {
            self.events
                .lock()
                .unwrap()
                .push(SinkEvent::Hide(message.text().to_string()));
        }
    }

    fn notifier() -> (StatusNotifier, JoinHandle<()>, ReceivedEvents) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = TestStatusSink {
            events: events.clone(),
        };
        let (notifier, task) = StatusNotifier::spawn(Arc::new(sink), DISPLAY);

        (notifier, task, events)
    }

    fn show(text: &str) -> SinkEvent {
        SinkEvent::Show(text.to_string())
    }

    fn hide(text: &str) -> SinkEvent {
        SinkEvent::Hide(text.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn notify_does_not_wait_for_display() {
        let (notifier, _task, events) = notifier();

        notifier.notify(StatusMessage::reminders_cleared());

        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn messages_are_shown_one_at_a_time() {
        let (notifier, _task, events) = notifier();

        notifier.notify(StatusMessage::reminders_cleared());
        notifier.notify(StatusMessage::reminders_cleared());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[show("Reminders were cleared")]
        );

        tokio::time::sleep(DISPLAY).await;
        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[
                show("Reminders were cleared"),
                hide("Reminders were cleared"),
                show("Reminders were cleared"),
            ]
        );

        tokio::time::sleep(DISPLAY).await;
        assert_eq!(events.lock().unwrap().len(), 4);
        assert_eq!(
            events.lock().unwrap().last(),
            Some(&hide("Reminders were cleared"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_hides_current_message_and_stops() {
        let (notifier, task, events) = notifier();

        notifier.notify(StatusMessage::reminders_cleared());
        tokio::time::sleep(Duration::from_millis(1)).await;
        notifier.shutdown();
        task.await.unwrap();

        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[
                show("Reminders were cleared"),
                hide("Reminders were cleared"),
            ]
        );
        notifier.notify(StatusMessage::reminders_cleared());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_flushes_queued_messages() {
        let (notifier, task, events) = notifier();
        let set = StatusMessage::reminder_set(&Reminder {
            text: "Buy milk".to_string(),
            date: "1/1/2024".to_string(),
            time: "14:30PM".to_string(),
        });

        notifier.notify(set);
        notifier.notify(StatusMessage::reminders_cleared());
        notifier.shutdown();
        task.await.unwrap();

        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[
                show("Reminder set for 1/1/2024 at 14:30PM"),
                hide("Reminder set for 1/1/2024 at 14:30PM"),
                show("Reminders were cleared"),
                hide("Reminders were cleared"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_every_notifier_stops_the_queue() {
        let (notifier, task, events) = notifier();

        drop(notifier);
        task.await.unwrap();

        assert!(events.lock().unwrap().is_empty());
    }
}
