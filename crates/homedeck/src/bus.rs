use tokio::sync::broadcast;

use crate::event::CoreEvent;

/// Broadcast channel carrying [`CoreEvent`]s to any number of subscribers.
#[derive(Clone)]
pub struct Bus {
    sender: broadcast::Sender<CoreEvent>,
}

impl Bus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. A send error only means there are no subscribers,
    /// which is fine — the engine never waits on its listeners.
    pub fn publish(&self, event: CoreEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn publish_and_receive_event() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(CoreEvent::notification("Homedeck", "hello"));

        let received = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("recv");
        assert!(matches!(received, CoreEvent::Notification(ref n) if n.body == "hello"));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_event() {
        let bus = Bus::new(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(CoreEvent::TimerFinished);

        assert!(matches!(rx1.recv().await.expect("recv1"), CoreEvent::TimerFinished));
        assert!(matches!(rx2.recv().await.expect("recv2"), CoreEvent::TimerFinished));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let bus = Bus::new(8);
        bus.publish(CoreEvent::TimerFinished);
    }
}
