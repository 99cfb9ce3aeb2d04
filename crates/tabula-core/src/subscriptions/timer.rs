use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

/// A repeating timer emitting the current [`Instant`] every `interval`.
///
/// `id` keeps several timers apart, e.g. one spinner per widget:
///
/// ```rust,ignore
/// subscribe(Every::new(Duration::from_millis(80), "users-table"))
///     .map(|_| spinner::Message::Tick)
/// ```
pub struct Every {
    /// Time between ticks.
    pub interval: Duration,
    /// Distinguishes this timer from other `Every` subscriptions.
    pub id: String,
}

impl Every {
    pub fn new(interval: Duration, id: impl Into<String>) -> Self {
        Self {
            interval,
            id: id.into(),
        }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::with_str::<Self>(&self.id)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Box::pin(IntervalStream::new(interval).map(|tick| tick.into_std()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_the_key() {
        let a = Every::new(Duration::from_millis(10), "a");
        let b = Every::new(Duration::from_millis(10), "b");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), Every::new(Duration::from_secs(1), "a").id());
    }

    #[tokio::test]
    async fn emits_ticks() {
        let mut stream = Every::new(Duration::from_millis(1), "t").stream();
        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_some());
    }
}
