//! # Component Demo
//!
//! Four input fields above a selectable employee table, with a light/dark
//! toggle and a summary of the selected employees.
//!
//! Tab / Shift+Tab move focus between the fields and the table, F2 toggles
//! dark mode, F5 reloads the table, Esc quits.
//!
//! Run with: `cargo run --example showcase`

#[path = "support/users.rs"]
mod users;

use std::time::Duration;
use tabula::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tabula::ratatui::layout::{Constraint, Layout, Margin, Rect};
use tabula::ratatui::style::{Color, Modifier, Style};
use tabula::ratatui::text::{Line, Span};
use tabula::ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tabula::ratatui::Frame;
use tabula::widgets::chrome::Variant;
use tabula::widgets::data_table::{self, DataTable};
use tabula::widgets::input_field::{self, FieldType, InputField};
use tabula::widgets::key::KeyMap;
use tabula::widgets::record::Value;
use tabula::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use users::{money, sample_users, user_columns, User};

const TABLE: usize = 4;

struct Showcase {
    fields: Vec<InputField>,
    table: DataTable<User>,
    selected: Vec<User>,
    focused: usize,
    dark: bool,
}

#[derive(Debug)]
enum Msg {
    Field(usize, input_field::Message),
    Table(data_table::Message<User>),
    /// Terminal input for whatever has focus.
    Key(KeyEvent),
    Paste(String),
    FocusNext,
    FocusPrev,
    ToggleDark,
    Reload,
    Reloaded,
    Quit,
}

fn fields() -> Vec<InputField> {
    vec![
        InputField::new()
            .with_id("full-name")
            .with_label("Full Name")
            .with_placeholder("Enter your full name")
            .with_variant(Variant::Outlined),
        InputField::new()
            .with_id("email")
            .with_label("Email Address")
            .with_placeholder("your.email@company.com")
            .with_field_type(FieldType::Email)
            .with_variant(Variant::Filled)
            .with_invalid(true)
            .with_error_message("Enter Valid Email")
            .with_helper_text("We'll use this for important notifications")
            .with_show_clear(false),
        InputField::new()
            .with_id("password")
            .with_label("Password")
            .with_placeholder("Create a secure password")
            .with_field_type(FieldType::Password)
            .with_show_password_toggle(true)
            .with_helper_text("Must be at least 8 characters long")
            .with_show_clear(false),
        InputField::new()
            .with_id("address")
            .with_label("Address")
            .with_placeholder("Enter Your Address...")
            .with_loading(true),
    ]
}

fn table() -> DataTable<User> {
    let columns = user_columns()
        .into_iter()
        .map(|column| match column.key.as_str() {
            "salary" => column.render(|v, _, _| money(v)),
            _ => column,
        })
        .collect();
    DataTable::new(sample_users(), columns)
        .with_selectable(true)
        .with_multi_select(true)
        .with_empty_message("No Columns")
        .with_title("Employees")
        .with_id("employees")
}

impl Showcase {
    fn set_focus(&mut self, next: usize) {
        match self.focused {
            TABLE => self.table.blur(),
            i => self.fields[i].blur(),
        }
        self.focused = next;
        match self.focused {
            TABLE => self.table.focus(),
            i => self.fields[i].focus(),
        }
    }

    fn theme(&self) -> (Style, Style) {
        if self.dark {
            (
                Style::default().bg(Color::Rgb(17, 24, 39)).fg(Color::White),
                Style::default().fg(Color::Rgb(55, 65, 81)),
            )
        } else {
            (
                Style::default().bg(Color::Rgb(249, 250, 251)).fg(Color::Black),
                Style::default().fg(Color::Rgb(229, 231, 235)),
            )
        }
    }

    fn section<'a>(&self, title: &'a str) -> Block<'a> {
        let (_, border) = self.theme();
        Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(
                format!(" {title} "),
                Style::default().add_modifier(Modifier::BOLD),
            ))
    }

    fn view_fields(&self, frame: &mut Frame, area: Rect) {
        let block = self.section("InputField Component Demo");
        let inner = block.inner(area).inner(Margin::new(1, 0));
        frame.render_widget(block, area);

        let [left, right] = Layout::horizontal([Constraint::Fill(1); 2])
            .spacing(2)
            .areas(inner);
        for (column, pair) in [left, right].into_iter().zip(self.fields.chunks(2)) {
            let areas =
                Layout::vertical(pair.iter().map(|f| Constraint::Length(f.height() + 1))).split(column);
            for (field, field_area) in pair.iter().zip(areas.iter()) {
                field.view(frame, *field_area);
            }
        }
    }

    fn summary(&self) -> Line<'_> {
        if self.selected.is_empty() {
            return Line::from("No employees selected");
        }
        let total: u32 = self.selected.iter().map(|u| u.salary).sum();
        let names: Vec<&str> = self.selected.iter().map(|u| u.name).collect();
        Line::from(vec![
            Span::styled(
                format!("Selected Employees ({}): ", self.selected.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(names.join(", ")),
            Span::raw(format!("  total salary {}", money(Some(&Value::from(total))))),
        ])
    }
}

impl Model for Showcase {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let mut fields = fields();
        fields[0].focus();
        (
            Showcase {
                fields,
                table: table(),
                selected: Vec::new(),
                focused: 0,
                dark: false,
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Field(i, input_field::Message::Changed(event)) => {
                tracing::debug!(field = i, origin = ?event.origin, "field changed");
                Command::none()
            }
            Msg::Field(i, m) => match self.fields.get_mut(i) {
                Some(field) => field.update(m).map(move |m| Msg::Field(i, m)),
                None => Command::none(),
            },
            Msg::Table(data_table::Message::SelectionChanged(rows)) => {
                tracing::info!(count = rows.len(), "employees selected");
                self.selected = rows;
                Command::none()
            }
            Msg::Table(m) => self.table.update(m).map(Msg::Table),
            Msg::Key(key) => match self.focused {
                TABLE => self.update(Msg::Table(data_table::Message::KeyPress(key))),
                i => self.update(Msg::Field(i, input_field::Message::KeyPress(key))),
            },
            Msg::Paste(text) => match self.focused {
                TABLE => Command::none(),
                i => self.update(Msg::Field(i, input_field::Message::Paste(text))),
            },
            Msg::FocusNext => {
                self.set_focus((self.focused + 1) % (TABLE + 1));
                Command::none()
            }
            Msg::FocusPrev => {
                self.set_focus((self.focused + TABLE) % (TABLE + 1));
                Command::none()
            }
            Msg::ToggleDark => {
                self.dark = !self.dark;
                Command::none()
            }
            Msg::Reload => {
                self.table.set_loading(true);
                Command::tick(Duration::from_millis(1200), |_| Msg::Reloaded)
            }
            Msg::Reloaded => {
                self.table.set_rows(sample_users());
                self.table.set_loading(false);
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let (page, _) = self.theme();
        frame.render_widget(Block::new().style(page), frame.area());

        let area = frame.area().inner(Margin::new(2, 1));
        let fields_height = self
            .fields
            .chunks(2)
            .map(|pair| pair.iter().map(|f| f.height() + 1).sum::<u16>())
            .max()
            .unwrap_or(0)
            + 2;
        let [header, fields_area, table_area, summary, help] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(fields_height),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let mode = if self.dark { "☀ light (F2)" } else { "☾ dark (F2)" };
        let [title, toggle] = Layout::horizontal([Constraint::Fill(1), Constraint::Length(14)]).areas(header);
        frame.render_widget(
            Paragraph::new(vec![
                Line::styled("Component Demo", Style::default().add_modifier(Modifier::BOLD)),
                Line::styled(
                    "Interactive showcase of InputField and DataTable components",
                    Style::default().fg(Color::Gray),
                ),
            ]),
            title,
        );
        frame.render_widget(Paragraph::new(mode).right_aligned(), toggle);

        self.view_fields(frame, fields_area);

        let block = self.section("DataTable Component Demo");
        let inner = block.inner(table_area);
        frame.render_widget(block, table_area);
        self.table.view(frame, inner);

        frame.render_widget(Paragraph::new(self.summary()), summary);

        let bindings = match self.focused {
            TABLE => self.table.key_bindings().help_line(),
            i => self.fields[i].key_bindings().help_line(),
        };
        frame.render_widget(
            Paragraph::new(format!("tab focus • {bindings} • F5 reload • esc quit"))
                .style(Style::default().fg(Color::DarkGray)),
            help,
        );
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|ev| match ev {
            TerminalEvent::Key(key) => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => Some(Msg::Quit),
                (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
                (KeyCode::Tab, _) => Some(Msg::FocusNext),
                (KeyCode::BackTab, _) => Some(Msg::FocusPrev),
                (KeyCode::F(2), _) => Some(Msg::ToggleDark),
                (KeyCode::F(5), _) => Some(Msg::Reload),
                _ => Some(Msg::Key(key)),
            },
            TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
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
        subs.extend(self.table.subscriptions().into_iter().map(|s| s.map(Msg::Table)));
        subs
    }
}

#[tabula::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = tabula::ProgramOptions {
        title: Some("tabula: component demo".into()),
        log_file: std::env::var_os("TABULA_LOG").map(Into::into),
        ..tabula::ProgramOptions::default()
    };
    tabula::run_with::<Showcase>((), options).await?;
    Ok(())
}
