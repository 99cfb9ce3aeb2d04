use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level program trait.
///
/// The runtime calls [`init`](Model::init) once, renders with
/// [`view`](Model::view), feeds every message from subscriptions and commands
/// into [`update`](Model::update), re-renders, and repeats until a
/// [`Command::quit`] comes back.
///
/// ```rust,ignore
/// use tabula_core::{Command, Model};
/// use ratatui::widgets::Paragraph;
///
/// struct Picked { count: usize }
///
/// enum Msg { Selected(usize) }
///
/// impl Model for Picked {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<Msg>) {
///         (Picked { count: 0 }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         let Msg::Selected(n) = msg;
///         self.count = n;
///         Command::none()
///     }
///
///     fn view(&self, frame: &mut ratatui::Frame) {
///         frame.render_widget(Paragraph::new(format!("{} selected", self.count)), frame.area());
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// Every event that can change program state.
    type Message: Send + 'static;

    /// Startup data handed to [`Model::init`]. Use `()` when none is needed.
    type Flags: Send + 'static;

    /// Build the initial state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process one message and return follow-up work.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw the current state. Must not mutate anything observable.
    fn view(&self, frame: &mut Frame);

    /// Subscriptions wanted in the current state; re-evaluated after every
    /// update and diffed against the running set.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
