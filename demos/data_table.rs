//! # Data Table Stories
//!
//! One table per story: default, selection, single selection, loading,
//! empty, custom rendering and sortable. Number keys switch stories; the
//! table takes every other key.
//!
//! Run with: `cargo run --example data_table`

#[path = "support/users.rs"]
mod users;

use tabula::crossterm::event::{KeyCode, KeyModifiers};
use tabula::ratatui::layout::{Constraint, Layout};
use tabula::ratatui::style::{Color, Modifier, Style};
use tabula::ratatui::text::{Line, Span};
use tabula::ratatui::widgets::Paragraph;
use tabula::ratatui::Frame;
use tabula::widgets::data_table::{self, Column, DataTable};
use tabula::widgets::key::KeyMap;
use tabula::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use users::{money, sample_users, user_columns, User};

const STORIES: [&str; 7] = [
    "Default",
    "With selection",
    "Single selection",
    "Loading",
    "Empty",
    "Custom rendering",
    "Sortable",
];

fn story(index: usize) -> DataTable<User> {
    let table = match index {
        1 => DataTable::new(sample_users(), user_columns()).with_selectable(true),
        2 => DataTable::new(sample_users(), user_columns())
            .with_selectable(true)
            .with_multi_select(false),
        3 => DataTable::new(Vec::new(), user_columns())
            .with_loading(true)
            .with_loading_message("Fetching user data..."),
        4 => DataTable::new(Vec::new(), user_columns())
            .with_empty_message("No users found. Try adjusting your search criteria."),
        5 => {
            let columns = user_columns()
                .into_iter()
                .map(|column| match column.key.as_str() {
                    "salary" => column.render(|v, _, _| money(v)),
                    "status" => column.render(|v, _, _| match v {
                        Some(v) => format!("● {v}"),
                        None => String::new(),
                    }),
                    _ => column,
                })
                .collect();
            DataTable::new(sample_users(), columns).with_selectable(true)
        }
        6 => {
            let columns: Vec<Column<User>> = user_columns()
                .into_iter()
                .chain([Column::new("joinDate", "Joined")])
                .map(|c| c.sortable(true))
                .collect();
            DataTable::new(sample_users(), columns)
        }
        _ => DataTable::new(sample_users(), user_columns()),
    };
    let mut table = table.with_title(STORIES[index]).with_id(format!("story-{index}"));
    table.focus();
    table
}

struct Stories {
    index: usize,
    table: DataTable<User>,
    selected: Vec<User>,
}

#[derive(Debug)]
enum Msg {
    Table(data_table::Message<User>),
    Story(usize),
    Quit,
}

impl Model for Stories {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        (
            Stories {
                index: 0,
                table: story(0),
                selected: Vec::new(),
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Table(data_table::Message::SelectionChanged(rows)) => {
                tracing::info!(count = rows.len(), "rows selected");
                self.selected = rows;
                Command::none()
            }
            Msg::Table(m) => self.table.update(m).map(Msg::Table),
            Msg::Story(index) => {
                self.index = index;
                self.table = story(index);
                self.selected.clear();
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [tabs_area, table_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let mut tabs = Vec::new();
        for (i, name) in STORIES.iter().enumerate() {
            let style = if i == self.index {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            tabs.push(Span::styled(format!(" {} {name} ", i + 1), style));
        }
        frame.render_widget(Paragraph::new(Line::from(tabs)), tabs_area);

        self.table.view(frame, table_area);

        let names: Vec<&str> = self.selected.iter().map(|u| u.name).collect();
        let status = if names.is_empty() {
            "Nothing selected".to_string()
        } else {
            format!("Selected: {}", names.join(", "))
        };
        frame.render_widget(Paragraph::new(status), status_area);

        let help = format!("{} • 1-7 story • esc quit", self.table.key_bindings().help_line());
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            help_area,
        );
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|ev| match ev {
            TerminalEvent::Key(key) => match (key.code, key.modifiers) {
                (KeyCode::Esc | KeyCode::Char('q'), _) => Some(Msg::Quit),
                (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
                (KeyCode::Char(c @ '1'..='7'), _) => Some(Msg::Story(c as usize - '1' as usize)),
                _ => Some(Msg::Table(data_table::Message::KeyPress(key))),
            },
            _ => None,
        })];
        subs.extend(self.table.subscriptions().into_iter().map(|s| s.map(Msg::Table)));
        subs
    }
}

#[tabula::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = tabula::ProgramOptions {
        title: Some("tabula: data table".into()),
        log_file: std::env::var_os("TABULA_LOG").map(Into::into),
        ..tabula::ProgramOptions::default()
    };
    tabula::run_with::<Stories>((), options).await?;
    Ok(())
}
