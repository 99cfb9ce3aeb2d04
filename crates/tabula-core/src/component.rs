use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// An embeddable widget that renders into a caller-chosen [`Rect`].
///
/// A parent [`Model`](crate::Model) owns its components, routes messages to
/// them, and decides where each one draws.  Whatever a component wants to
/// report (a changed value, a new selection) comes back from
/// [`update`](Component::update) as a [`Command`] carrying one of the
/// component's own messages; the parent lifts it with [`Command::map`].
///
/// ```rust,ignore
/// use tabula_core::{Command, Component, Model};
/// use tabula_widgets::input_field::{self, InputField};
///
/// struct App { email: InputField }
///
/// enum Msg { Email(input_field::Message) }
///
/// impl Model for App {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<Msg>) {
///         (App { email: InputField::new().with_label("Email") }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Email(input_field::Message::Changed(ev)) => {
///                 tracing::debug!(value = %ev.value, "email edited");
///                 Command::none()
///             }
///             Msg::Email(m) => self.email.update(m).map(Msg::Email),
///         }
///     }
///
///     fn view(&self, frame: &mut ratatui::Frame) {
///         self.email.view(frame, frame.area());
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's message type: inbound interaction plus outbound
    /// notifications.
    type Message: Send + 'static;

    /// Process a message, mutate local state, and return a [`Command`].
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`. Implementations must stay inside the rectangle.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Subscriptions this component needs while in its current state (for
    /// example a spinner tick while loading). The parent collects and maps
    /// them into its own [`Model::subscriptions`](crate::Model::subscriptions).
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has keyboard focus.
    fn focused(&self) -> bool {
        false
    }
}
