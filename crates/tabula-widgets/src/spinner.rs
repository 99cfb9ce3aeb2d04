//! Busy indicator shown by the loading states.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::Duration;
use tabula_core::subscription::{subscribe, Subscription};
use tabula_core::subscriptions::Every;
use tabula_core::{Command, Component};

/// Braille dots, ten positions.
pub const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const INTERVAL: Duration = Duration::from_millis(80);

#[derive(Debug, Clone)]
pub enum Message {
    /// Advance one frame.
    Tick,
}

/// An animated spinner. It ticks through [`FRAMES`] on an interval
/// subscription keyed by `id`, so every spinner on screen needs its own id.
pub struct Spinner {
    frame_index: usize,
    label: String,
    style: Style,
    spinning: bool,
    id: String,
}

impl Spinner {
    /// A stopped spinner at 80ms per frame.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            frame_index: 0,
            label: String::new(),
            style: Style::default().fg(Color::Cyan),
            spinning: false,
            id: id.into(),
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Text rendered after the frame.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn start(&mut self) {
        self.spinning = true;
    }

    pub fn stop(&mut self) {
        self.spinning = false;
        self.frame_index = 0;
    }

    pub fn set_spinning(&mut self, spinning: bool) {
        if spinning {
            self.start();
        } else {
            self.stop();
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn frame(&self) -> &'static str {
        FRAMES[self.frame_index % FRAMES.len()]
    }

    /// Frame and label as one string, e.g. `"⠋ Loading..."`.
    pub fn text(&self) -> String {
        if self.label.is_empty() {
            self.frame().to_string()
        } else {
            format!("{} {}", self.frame(), self.label)
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

impl Component for Spinner {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Tick => {
                if self.spinning {
                    self.frame_index = (self.frame_index + 1) % FRAMES.len();
                }
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if !self.spinning || area.width == 0 || area.height == 0 {
            return;
        }
        frame.render_widget(Paragraph::new(Span::styled(self.text(), self.style)), area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.spinning {
            vec![subscribe(Every::new(INTERVAL, self.id.clone())).map(|_| Message::Tick)]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::testing::render_component;

    #[test]
    fn ticks_advance_and_wrap_while_spinning() {
        let mut spinner = Spinner::new("t");
        spinner.start();
        for _ in 0..12 {
            spinner.update(Message::Tick);
        }
        assert_eq!(spinner.frame(), "⠹");
    }

    #[test]
    fn stopped_spinner_ignores_ticks_and_subscribes_to_nothing() {
        let mut spinner = Spinner::new("t");
        spinner.update(Message::Tick);
        assert_eq!(spinner.frame(), "⠋");
        assert!(spinner.subscriptions().is_empty());
        spinner.start();
        assert_eq!(spinner.subscriptions().len(), 1);
    }

    #[test]
    fn stop_rewinds_to_the_first_frame() {
        let mut spinner = Spinner::new("t");
        spinner.start();
        spinner.update(Message::Tick);
        spinner.set_spinning(false);
        assert!(!spinner.is_spinning());
        assert_eq!(spinner.frame(), "⠋");
    }

    #[test]
    fn renders_frame_and_label_only_while_spinning() {
        let mut spinner = Spinner::new("t");
        spinner.set_label("Loading...");
        assert_eq!(render_component(&spinner, 12, 1), "            ");
        spinner.start();
        assert_eq!(render_component(&spinner, 12, 1), "⠋ Loading...");
    }
}
