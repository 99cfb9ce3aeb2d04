//! # Input Field Stories
//!
//! Every input field story stacked on one screen: default, filled, ghost,
//! password toggle, loading and error. The first field is controlled: its
//! value lives here and is fed back after each change.
//!
//! Tab / Shift+Tab move focus, Ctrl+X clears, Ctrl+R reveals a password,
//! Esc quits.
//!
//! Run with: `cargo run --example input_field`

use tabula::crossterm::event::{KeyCode, KeyModifiers};
use tabula::ratatui::layout::{Constraint, Layout, Margin};
use tabula::ratatui::style::{Color, Modifier, Style};
use tabula::ratatui::widgets::Paragraph;
use tabula::ratatui::Frame;
use tabula::widgets::chrome::Variant;
use tabula::widgets::input_field::{self, FieldType, InputField};
use tabula::widgets::key::KeyMap;
use tabula::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};

struct Stories {
    fields: Vec<InputField>,
    focused: usize,
    /// Owned value of the controlled first field.
    name: String,
}

#[derive(Debug)]
enum Msg {
    Field(usize, input_field::Message),
    /// Terminal input for whichever field has focus.
    Input(input_field::Message),
    FocusNext,
    FocusPrev,
    Quit,
}

fn fields() -> Vec<InputField> {
    vec![
        InputField::controlled("")
            .with_id("default")
            .with_label("Name")
            .with_placeholder("Enter your name")
            .with_helper_text("This is helper text"),
        InputField::new()
            .with_id("filled")
            .with_label("Filled")
            .with_placeholder("Filled variant")
            .with_variant(Variant::Filled),
        InputField::new()
            .with_id("ghost")
            .with_label("Ghost")
            .with_placeholder("Ghost variant")
            .with_variant(Variant::Ghost),
        InputField::new()
            .with_id("password")
            .with_label("Password")
            .with_placeholder("Enter password")
            .with_field_type(FieldType::Password)
            .with_show_password_toggle(true),
        InputField::uncontrolled("Searching")
            .with_id("loading")
            .with_label("Loading")
            .with_loading(true),
        InputField::uncontrolled("not-an-email")
            .with_id("email")
            .with_label("Email")
            .with_field_type(FieldType::Email)
            .with_invalid(true)
            .with_error_message("Please provide a valid email"),
    ]
}

impl Stories {
    fn move_focus(&mut self, forward: bool) {
        self.fields[self.focused].blur();
        let len = self.fields.len();
        self.focused = if forward {
            (self.focused + 1) % len
        } else {
            (self.focused + len - 1) % len
        };
        self.fields[self.focused].focus();
    }
}

impl Model for Stories {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let mut fields = fields();
        fields[0].focus();
        (
            Stories {
                fields,
                focused: 0,
                name: String::new(),
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Field(0, input_field::Message::Changed(event)) => {
                tracing::debug!(origin = ?event.origin, "name changed");
                self.name = event.value;
                self.fields[0].set_value(self.name.clone());
                Command::none()
            }
            Msg::Field(i, m) => match self.fields.get_mut(i) {
                Some(field) => field.update(m).map(move |m| Msg::Field(i, m)),
                None => Command::none(),
            },
            Msg::Input(m) => self.update(Msg::Field(self.focused, m)),
            Msg::FocusNext => {
                self.move_focus(true);
                Command::none()
            }
            Msg::FocusPrev => {
                self.move_focus(false);
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(self.fields.iter().map(|f| Constraint::Length(f.height() + 1)));
        constraints.push(Constraint::Fill(1));
        constraints.push(Constraint::Length(1));
        let areas = Layout::vertical(constraints).split(frame.area());

        let title = Paragraph::new(format!("Input field stories  (name = {:?})", self.name))
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(title, areas[0]);

        for (i, field) in self.fields.iter().enumerate() {
            let area = areas[i + 1];
            field.view(frame, area.inner(Margin::new(1, 0)));
        }

        let bindings = self.fields[self.focused].key_bindings();
        let help = format!("tab next • shift+tab previous • {} • esc quit", bindings.help_line());
        if let Some(help_area) = areas.last() {
            frame.render_widget(
                Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
                *help_area,
            );
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|ev| match ev {
            TerminalEvent::Key(key) => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => Some(Msg::Quit),
                (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
                (KeyCode::Tab, _) => Some(Msg::FocusNext),
                (KeyCode::BackTab, _) => Some(Msg::FocusPrev),
                _ => Some(Msg::Input(input_field::Message::KeyPress(key))),
            },
            TerminalEvent::Paste(text) => Some(Msg::Input(input_field::Message::Paste(text))),
            _ => None,
        })];
        for (i, field) in self.fields.iter().enumerate() {
            subs.extend(
                field
                    .subscriptions()
                    .into_iter()
                    .map(move |s| s.map(move |m| Msg::Field(i, m))),
            );
        }
        subs
    }
}

#[tabula::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = tabula::ProgramOptions {
        title: Some("tabula: input field".into()),
        log_file: std::env::var_os("TABULA_LOG").map(Into::into),
        ..tabula::ProgramOptions::default()
    };
    tabula::run_with::<Stories>((), options).await?;
    Ok(())
}
