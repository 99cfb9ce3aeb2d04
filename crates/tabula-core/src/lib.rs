//! Core runtime for **tabula** widgets.
//!
//! `tabula-core` provides the traits, types and runtime that host the tabula
//! widgets.  Programs follow the [Elm Architecture]: state changes happen in a
//! synchronous **update**, rendering is a pure **view** of the state, and
//! anything a widget wants to tell its owner travels outward as a
//! [`Command`] carrying a message.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Embeddable widget that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Outbound message or deferred side effect returned from `update` |
//! | [`Subscription`] | Long-lived event source (terminal events, timers) |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit tests |
//!
//! # Callbacks as messages
//!
//! Widgets never call back into their owner.  When a data table's selection
//! changes, its `update` returns `Command::message(Message::SelectionChanged(rows))`;
//! the owner maps that command into its own message space with
//! [`Command::map`] and reacts on the next `update`.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use logging::init_file_logging;
pub use model::Model;
pub use runtime::{OutputTarget, Program, ProgramError, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, Every};

/// Run a tabula program with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
