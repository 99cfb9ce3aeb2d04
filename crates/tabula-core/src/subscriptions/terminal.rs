use crate::event::TerminalEvent;
use crate::subscription::{forward, Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;

/// Marker type giving the terminal event subscription its identity.
pub struct TerminalEvents;

/// Subscribe to terminal input, mapping each event to an optional message.
///
/// Returning `None` from `map` discards the event.
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::Key(key)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        // The EventStream is built inside the spawner: subscriptions() runs on
        // every update and a second live EventStream would steal input.
        spawn: Box::new(move |tx| {
            let stream = EventStream::new().filter_map(move |result| {
                let map = map.clone();
                async move {
                    match result {
                        Ok(event) => TerminalEvent::from_crossterm(event).and_then(|ev| map(ev)),
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to read terminal event");
                            None
                        }
                    }
                }
            });
            forward(Box::pin(stream), tx)
        }),
    }
}
