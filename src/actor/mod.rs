use async_trait::async_trait;
use tokio::{sync::mpsc, task::JoinHandle};

pub enum ActorStatus<TState> {
    Continue(TState),
    Stop,
}

/// A single-task actor. Messages are handled one at a time, in arrival order.
#[async_trait]
pub trait Actor: Sized + 'static {
    type Message: Send + 'static;
    type State: Send + 'static;
    type InitArgs: Send;

    fn handle_message(
        msg: Self::Message,
        state: Self::State,
        context: &ActorContext<Self>,
    ) -> anyhow::Result<ActorStatus<Self::State>>;

    async fn init_state(args: Self::InitArgs) -> anyhow::Result<Self::State>;
}

pub struct ActorContext<TActor: Actor> {
    pub self_ref: ActorReference<TActor>,
}

pub struct ActorReference<TActor: Actor>(mpsc::UnboundedSender<TActor::Message>);

impl<TActor: Actor> Clone for ActorReference<TActor> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<TActor: Actor> ActorReference<TActor> {
    pub fn send_message(&self, msg: TActor::Message) -> anyhow::Result<()> {
        self.0
            .send(msg)
            .map_err(|_| anyhow::anyhow!("Actor mailbox is closed"))
    }
}

pub struct ActorHandle<TActor: Actor> {
    task: JoinHandle<()>,
    reference: ActorReference<TActor>,
}

impl<TActor: Actor> ActorHandle<TActor> {
    pub fn actor_reference(&self) -> &ActorReference<TActor> {
        &self.reference
    }

    pub async fn join(self) -> anyhow::Result<()> {
        self.task.await?;
        Ok(())
    }
}

pub async fn start<TActor: Actor>(args: TActor::InitArgs) -> anyhow::Result<ActorHandle<TActor>> {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let reference = ActorReference(sender);
    let context = ActorContext {
        self_ref: reference.clone(),
    };
    let initial_state = TActor::init_state(args).await?;

    let task = tokio::spawn(async move {
        let mut state = initial_state;
        while let Some(msg) = receiver.recv().await {
            match TActor::handle_message(msg, state, &context) {
                Ok(ActorStatus::Continue(new_state)) => state = new_state,
                Ok(ActorStatus::Stop) => {
                    log::debug!("Actor stopped");
                    break;
                }
                Err(e) => {
                    log::error!("Actor failed to handle a message, stopping. {e:?}");
                    break;
                }
            }
        }
    });

    Ok(ActorHandle { task, reference })
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;

    use super::*;

    struct CounterActor;

    enum CounterMessage {
        Add(u32),
        AddLater(u32),
        Get(oneshot::Sender<u32>),
        Fail,
        Stop,
    }

    #[async_trait]
    impl Actor for CounterActor {
        type Message = CounterMessage;
        type State = u32;
        type InitArgs = u32;

        fn handle_message(
            msg: Self::Message,
            state: Self::State,
            context: &ActorContext<Self>,
        ) -> anyhow::Result<ActorStatus<Self::State>> {
            match msg {
                CounterMessage::Add(n) => Ok(ActorStatus::Continue(state + n)),
                CounterMessage::AddLater(n) => {
                    let self_ref = context.self_ref.clone();
                    tokio::spawn(async move {
                        let _ = self_ref.send_message(CounterMessage::Add(n));
                    });
                    Ok(ActorStatus::Continue(state))
                }
                CounterMessage::Get(reply) => {
                    let _ = reply.send(state);
                    Ok(ActorStatus::Continue(state))
                }
                CounterMessage::Fail => anyhow::bail!("boom"),
                CounterMessage::Stop => Ok(ActorStatus::Stop),
            }
        }

        async fn init_state(args: Self::InitArgs) -> anyhow::Result<Self::State> {
            Ok(args)
        }
    }

    async fn get(handle: &ActorHandle<CounterActor>) -> u32 {
        let (tx, rx) = oneshot::channel();
        handle
            .actor_reference()
            .send_message(CounterMessage::Get(tx))
            .unwrap();
        rx.await.unwrap()
    }

    #[tokio::test]
    async fn messages_are_applied_in_order() {
        let handle = start::<CounterActor>(10).await.unwrap();
        let actor = handle.actor_reference().clone();

        actor.send_message(CounterMessage::Add(1)).unwrap();
        actor.send_message(CounterMessage::Add(2)).unwrap();

        assert_eq!(get(&handle).await, 13);
    }

    #[tokio::test]
    async fn self_reference_delivers_messages_back() {
        let handle = start::<CounterActor>(0).await.unwrap();

        handle
            .actor_reference()
            .send_message(CounterMessage::AddLater(5))
            .unwrap();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(get(&handle).await, 5);
    }

    #[tokio::test]
    async fn stop_finishes_the_task() {
        let handle = start::<CounterActor>(0).await.unwrap();
        let actor = handle.actor_reference().clone();

        actor.send_message(CounterMessage::Stop).unwrap();
        handle.join().await.unwrap();

        assert!(actor.send_message(CounterMessage::Add(1)).is_err());
    }

    #[tokio::test]
    async fn handler_error_stops_the_actor() {
        let handle = start::<CounterActor>(0).await.unwrap();
        let actor = handle.actor_reference().clone();

        actor.send_message(CounterMessage::Fail).unwrap();
        handle.join().await.unwrap();

        assert!(actor.send_message(CounterMessage::Add(1)).is_err());
    }
}
