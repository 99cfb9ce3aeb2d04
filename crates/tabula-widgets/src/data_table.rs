//! Data table over generic records with three-state column sorting, single or
//! multi row selection, and loading and empty states.
//!
//! Rows are tracked by identity ([`RowKey`]), never by where they are shown,
//! so re-sorting keeps the same rows selected. Selection changes leave the
//! table as [`Message::SelectionChanged`] carrying the selected rows in
//! display order.
//!
//! ```rust,ignore
//! let columns = vec![
//!     Column::new("name", "Name").sortable(true),
//!     Column::new("salary", "Salary")
//!         .sortable(true)
//!         .align(Align::Right)
//!         .render(|v, _, _| v.map(|v| format!("${v}")).unwrap_or_default()),
//! ];
//! let mut table = DataTable::new(users, columns).with_title("Employees");
//! table.focus();
//! ```

use crate::chrome;
use crate::identity::{RowId, RowKey};
use crate::key::{Binding, KeyCombination, KeyMap};
use crate::record::{Record, Value};
use crate::selection::{CheckState, Selection, SelectionMode};
use crate::sort::{self, SortDirection, SortState};
use crate::spinner::{self, Spinner};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell as TableCell, Row, Table, TableState};
use ratatui::Frame;
use std::cell::Cell;
use unicode_width::UnicodeWidthStr;
use tabula_core::{Command, Component, Subscription};

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Align> for Alignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Alignment::Left,
            Align::Center => Alignment::Center,
            Align::Right => Alignment::Right,
        }
    }
}

type CellRenderer<R> = Box<dyn Fn(Option<&Value>, &R, usize) -> String + Send>;

/// One column of a [`DataTable`].
pub struct Column<R> {
    /// Unique among the table's columns; the first match wins otherwise.
    pub key: String,
    pub title: String,
    /// Record field shown and sorted by. Defaults to `key`.
    pub field: String,
    pub sortable: bool,
    pub align: Align,
    pub width: Constraint,
    render: Option<CellRenderer<R>>,
}

impl<R> Column<R> {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            field: key.clone(),
            key,
            title: title.into(),
            sortable: false,
            align: Align::Left,
            width: Constraint::Fill(1),
            render: None,
        }
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    /// Custom cell text from the field value, the record, and the row's
    /// display index.
    pub fn render(mut self, f: impl Fn(Option<&Value>, &R, usize) -> String + Send + 'static) -> Self {
        self.render = Some(Box::new(f));
        self
    }
}

impl<R: Record> Column<R> {
    /// Text of this column's cell for `row`. Missing values show as empty.
    pub fn cell_text(&self, row: &R, display_index: usize) -> String {
        let value = row.field(&self.field);
        match &self.render {
            Some(render) => render(value.as_ref(), row, display_index),
            None => value.map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

/// Sort state of a column as announced to assistive tech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaSort {
    Ascending,
    Descending,
    None,
}

#[derive(Debug, Clone)]
pub enum Message<R> {
    KeyPress(KeyEvent),
    /// Activate the header of the column with this key.
    Sort(String),
    /// Toggle the row at this display index.
    ToggleRow(usize),
    ToggleAll,
    /// Outbound: the selected rows, in display order.
    SelectionChanged(Vec<R>),
    Spinner(spinner::Message),
}

pub struct DataTableKeyBindings {
    /// Default: Up, k
    pub up: Binding,
    /// Default: Down, j
    pub down: Binding,
    /// Default: Home
    pub first: Binding,
    /// Default: End
    pub last: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    /// Move the header cursor. Default: Left, h
    pub col_left: Binding,
    /// Default: Right, l
    pub col_right: Binding,
    /// Sort by the header cursor's column. Default: Enter, s
    pub sort: Binding,
    /// Toggle the cursor row. Default: Space
    pub toggle: Binding,
    /// Default: a
    pub select_all: Binding,
}

impl Default for DataTableKeyBindings {
    fn default() -> Self {
        Self {
            up: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Up),
                    KeyCombination::new(KeyCode::Char('k')),
                ],
                "up",
            ),
            down: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Down),
                    KeyCombination::new(KeyCode::Char('j')),
                ],
                "down",
            ),
            first: Binding::new(KeyCombination::new(KeyCode::Home), "first"),
            last: Binding::new(KeyCombination::new(KeyCode::End), "last"),
            page_up: Binding::new(KeyCombination::new(KeyCode::PageUp), "page up"),
            page_down: Binding::new(KeyCombination::new(KeyCode::PageDown), "page down"),
            col_left: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Left),
                    KeyCombination::new(KeyCode::Char('h')),
                ],
                "column left",
            ),
            col_right: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Right),
                    KeyCombination::new(KeyCode::Char('l')),
                ],
                "column right",
            ),
            sort: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Char('s')),
                ],
                "sort",
            ),
            toggle: Binding::new(KeyCombination::new(KeyCode::Char(' ')), "select"),
            select_all: Binding::new(KeyCombination::new(KeyCode::Char('a')), "select all"),
        }
    }
}

impl KeyMap for DataTableKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.up, &self.down, &self.sort, &self.toggle, &self.select_all]
    }
}

#[derive(Debug, Clone)]
pub struct DataTableStyle {
    pub header: Style,
    /// Header cell under the column cursor while focused.
    pub active_header: Style,
    pub normal: Style,
    /// Rows in the selection.
    pub selected: Style,
    /// Row under the cursor while focused.
    pub cursor: Style,
    pub highlight_symbol: String,
    pub sort_indicator: Style,
}

impl Default for DataTableStyle {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            active_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            normal: Style::default(),
            selected: Style::default().fg(Color::Cyan),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            highlight_symbol: "▸ ".to_string(),
            sort_indicator: Style::default().fg(Color::Cyan),
        }
    }
}

pub struct DataTable<R> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    /// Identity of each row, by original position.
    ids: Vec<RowId>,
    /// Display order as indices into `rows`.
    order: Vec<usize>,
    sort: SortState,
    selection: Selection,
    row_key: RowKey<R>,
    loading: bool,
    empty_message: String,
    title: String,
    focus: bool,
    /// Display index of the row cursor.
    cursor: usize,
    header_cursor: usize,
    visible_height: Cell<usize>,
    style: DataTableStyle,
    key_bindings: DataTableKeyBindings,
    spinner: Spinner,
}

impl<R: Record + Clone + Send + 'static> DataTable<R> {
    /// An unsorted table keyed by the `id` field. Selection is off until
    /// [`with_selectable`](Self::with_selectable); it is multi-select once on.
    pub fn new(rows: Vec<R>, columns: Vec<Column<R>>) -> Self {
        let row_key = RowKey::default();
        let ids = row_key.resolve_all(&rows);
        let order = (0..rows.len()).collect();
        Self {
            rows,
            columns,
            ids,
            order,
            sort: SortState::Unsorted,
            selection: Selection::new(SelectionMode::Multi, false),
            row_key,
            loading: false,
            empty_message: "No data available".to_string(),
            title: String::new(),
            focus: false,
            cursor: 0,
            header_cursor: 0,
            visible_height: Cell::new(10),
            style: DataTableStyle::default(),
            key_bindings: DataTableKeyBindings::default(),
            spinner: Spinner::new("data-table"),
        }
        .with_loading_message("Loading...")
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selection.set_enabled(selectable);
        self
    }

    pub fn with_multi_select(mut self, multi: bool) -> Self {
        self.selection.set_mode(if multi {
            SelectionMode::Multi
        } else {
            SelectionMode::Single
        });
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.spinner.set_label(message);
        self
    }

    pub fn with_row_key(mut self, row_key: RowKey<R>) -> Self {
        self.row_key = row_key;
        self.ids = self.row_key.resolve_all(&self.rows);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_style(mut self, style: DataTableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_key_bindings(mut self, key_bindings: DataTableKeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    /// Keys the loading spinner's timer; needed when several tables load at
    /// once.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.spinner.set_id(format!("{}-spinner", id.into()));
        self
    }

    /// Replace the rows. Selected identities are kept, so rows that come
    /// back stay selected.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.ids = self.row_key.resolve_all(&rows);
        self.rows = rows;
        self.order = sort::sort_order(&self.rows, &self.columns, &self.sort);
        self.cursor = self.cursor.min(self.order.len().saturating_sub(1));
        tracing::debug!(rows = self.rows.len(), "table rows replaced");
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.spinner.set_spinning(loading);
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn key_bindings(&self) -> &DataTableKeyBindings {
        &self.key_bindings
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Rows in display order.
    pub fn displayed_rows(&self) -> Vec<&R> {
        self.order.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Display order as indices into [`rows`](Self::rows).
    pub fn display_order(&self) -> &[usize] {
        &self.order
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// No input rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn header_cursor(&self) -> usize {
        self.header_cursor
    }

    /// Selected rows among those displayed, in display order.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.selection
            .materialize(self.order.iter().map(|&i| (&self.ids[i], &self.rows[i])))
    }

    fn visible_ids(&self) -> Vec<RowId> {
        self.order.iter().map(|&i| self.ids[i].clone()).collect()
    }

    /// Header checkbox state; only multi-select tables have one.
    pub fn header_check_state(&self) -> Option<CheckState> {
        (self.selection.is_enabled() && self.selection.mode() == SelectionMode::Multi)
            .then(|| self.selection.check_state(&self.visible_ids()))
    }

    pub fn is_row_selected(&self, display_index: usize) -> bool {
        self.order
            .get(display_index)
            .is_some_and(|&i| self.selection.contains(&self.ids[i]))
    }

    /// Sort announcement for a column; `None` for non-sortable or unknown
    /// columns.
    pub fn aria_sort(&self, key: &str) -> Option<AriaSort> {
        let column = sort::find_column(&self.columns, key).filter(|c| c.sortable)?;
        Some(match self.sort.direction() {
            Some(SortDirection::Ascending) if self.sort.column() == Some(column.key.as_str()) => AriaSort::Ascending,
            Some(SortDirection::Descending) if self.sort.column() == Some(column.key.as_str()) => {
                AriaSort::Descending
            }
            _ => AriaSort::None,
        })
    }

    pub fn select_all_label(&self) -> &'static str {
        "Select all rows"
    }

    pub fn row_checkbox_label(&self, display_index: usize) -> String {
        format!("Select row {}", display_index + 1)
    }

    /// Activate the header of column `key`.
    pub fn sort_by(&mut self, key: &str) {
        let next = self.sort.activate(key, &self.columns);
        if next == self.sort {
            tracing::trace!(column = key, "sort ignored: column not sortable");
            return;
        }
        tracing::debug!(column = key, direction = ?next.direction(), "sort changed");
        let cursor_row = self.order.get(self.cursor).copied();
        self.sort = next;
        self.order = sort::sort_order(&self.rows, &self.columns, &self.sort);
        if let Some(pos) = cursor_row.and_then(|row| self.order.iter().position(|&i| i == row)) {
            self.cursor = pos;
        }
    }

    /// Toggle the row at `display_index` and report the new selection.
    pub fn toggle_row(&mut self, display_index: usize) -> Command<Message<R>> {
        let Some(&original) = self.order.get(display_index) else {
            return Command::none();
        };
        if !self.selection.toggle(self.ids[original].clone()) {
            return Command::none();
        }
        self.selection_changed()
    }

    /// Select every displayed row, or clear when all already are.
    pub fn toggle_all(&mut self) -> Command<Message<R>> {
        match self.selection.toggle_all(&self.visible_ids()) {
            Some(_) => self.selection_changed(),
            None => Command::none(),
        }
    }

    fn selection_changed(&self) -> Command<Message<R>> {
        let rows: Vec<R> = self.selected_rows().into_iter().cloned().collect();
        tracing::debug!(selected = rows.len(), "selection changed");
        Command::message(Message::SelectionChanged(rows))
    }

    fn move_cursor(&mut self, to: usize) {
        self.cursor = to.min(self.order.len().saturating_sub(1));
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message<R>> {
        let last = self.order.len().saturating_sub(1);
        let kb = &self.key_bindings;
        if kb.up.matches(&key) {
            self.move_cursor(if self.cursor == 0 { last } else { self.cursor - 1 });
        } else if kb.down.matches(&key) {
            self.move_cursor(if self.cursor >= last { 0 } else { self.cursor + 1 });
        } else if kb.first.matches(&key) {
            self.move_cursor(0);
        } else if kb.last.matches(&key) {
            self.move_cursor(last);
        } else if kb.page_up.matches(&key) {
            self.move_cursor(self.cursor.saturating_sub(self.visible_height.get()));
        } else if kb.page_down.matches(&key) {
            self.move_cursor(self.cursor + self.visible_height.get());
        } else if kb.col_left.matches(&key) {
            self.header_cursor = self.header_cursor.saturating_sub(1);
        } else if kb.col_right.matches(&key) {
            self.header_cursor = (self.header_cursor + 1).min(self.columns.len().saturating_sub(1));
        } else if kb.sort.matches(&key) {
            if let Some(key) = self.columns.get(self.header_cursor).map(|c| c.key.clone()) {
                self.sort_by(&key);
            }
        } else if kb.toggle.matches(&key) {
            return self.toggle_row(self.cursor);
        } else if kb.select_all.matches(&key) {
            return self.toggle_all();
        }
        Command::none()
    }

    fn header_row(&self) -> Row<'static> {
        let mut cells = Vec::with_capacity(self.columns.len() + 1);
        if self.selection.is_enabled() {
            let symbol = self.header_check_state().map_or(" ", CheckState::symbol);
            cells.push(TableCell::from(symbol));
        }
        for (i, column) in self.columns.iter().enumerate() {
            let indicator = match self.aria_sort(&column.key) {
                Some(AriaSort::Ascending) => " ▲",
                Some(AriaSort::Descending) => " ▼",
                Some(AriaSort::None) => "  ",
                None => "",
            };
            let style = if self.focus && i == self.header_cursor {
                self.style.active_header
            } else {
                self.style.header
            };
            let line = Line::from(vec![
                Span::raw(column.title.clone()),
                Span::styled(indicator, self.style.sort_indicator),
            ])
            .alignment(column.align.into());
            cells.push(TableCell::from(line).style(style));
        }
        Row::new(cells).height(1).bottom_margin(1)
    }

    fn body_rows(&self) -> Vec<Row<'static>> {
        if self.loading {
            return Vec::new();
        }
        self.order
            .iter()
            .enumerate()
            .map(|(display_index, &i)| {
                let row = &self.rows[i];
                let selected = self.selection.contains(&self.ids[i]);
                let mut cells = Vec::with_capacity(self.columns.len() + 1);
                if self.selection.is_enabled() {
                    let mark = match (self.selection.mode(), selected) {
                        (SelectionMode::Multi, true) => CheckState::Checked.symbol(),
                        (SelectionMode::Multi, false) => CheckState::Unchecked.symbol(),
                        (SelectionMode::Single, true) => "◉",
                        (SelectionMode::Single, false) => "○",
                    };
                    cells.push(TableCell::from(mark));
                }
                for column in &self.columns {
                    let line = Line::from(column.cell_text(row, display_index)).alignment(column.align.into());
                    cells.push(TableCell::from(line));
                }
                let style = if selected { self.style.selected } else { self.style.normal };
                Row::new(cells).style(style)
            })
            .collect()
    }
}

impl<R: Record + Clone + Send + 'static> Component for DataTable<R> {
    type Message = Message<R>;

    fn update(&mut self, msg: Message<R>) -> Command<Message<R>> {
        match msg {
            Message::Spinner(m) => self.spinner.update(m).map(Message::Spinner),
            _ if self.loading => {
                tracing::trace!("interaction ignored while loading");
                Command::none()
            }
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::Sort(key) => {
                self.sort_by(&key);
                Command::none()
            }
            Message::ToggleRow(display_index) => self.toggle_row(display_index),
            Message::ToggleAll => self.toggle_all(),
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let block = chrome::focus_block(&self.title, self.focus);
        let inner = block.inner(area);
        // Header row plus its bottom margin.
        let body = Rect {
            y: inner.y.saturating_add(2),
            height: inner.height.saturating_sub(2),
            ..inner
        };
        self.visible_height.set(body.height.max(1) as usize);

        let mut widths = Vec::with_capacity(self.columns.len() + 1);
        if self.selection.is_enabled() {
            widths.push(Constraint::Length(1));
        }
        widths.extend(self.columns.iter().map(|c| c.width));

        let table = Table::new(self.body_rows(), widths)
            .header(self.header_row())
            .block(block)
            .row_highlight_style(self.style.cursor)
            .highlight_symbol(self.style.highlight_symbol.as_str());
        let mut state = TableState::default();
        if self.focus && !self.loading && !self.order.is_empty() {
            state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(table, area, &mut state);

        if self.loading {
            let width = self.spinner.text().width() as u16;
            self.spinner.view(frame, chrome::centered(body, width, 1));
        } else if self.rows.is_empty() {
            let lines = vec![Line::from("∅"), Line::from(self.empty_message.clone())];
            chrome::status_panel(frame, body, lines);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message<R>>> {
        self.spinner
            .subscriptions()
            .into_iter()
            .map(|s| s.map(Message::Spinner))
            .collect()
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record;
    use crossterm::event::KeyModifiers;
    use std::collections::BTreeMap;
    use tabula_core::testing::{render_component, TestProgram};
    use tabula_core::Model;

    type Row = BTreeMap<String, Value>;

    fn user(id: i64, name: &str, salary: Option<i64>) -> Row {
        let mut row = record([("id", id.into()), ("name", name.into())]);
        if let Some(s) = salary {
            row.insert("salary".into(), s.into());
        }
        row
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("name", "Name").sortable(true),
            Column::new("salary", "Salary").sortable(true).align(Align::Right),
            Column::new("id", "ID"),
        ]
    }

    fn table() -> DataTable<Row> {
        DataTable::new(
            vec![
                user(1, "Carol", Some(300)),
                user(2, "alice", Some(100)),
                user(3, "Bob", None),
            ],
            columns(),
        )
        .with_selectable(true)
    }

    fn names(rows: &[Row]) -> Vec<String> {
        rows.iter()
            .map(|r| r.field("name").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    fn displayed(t: &DataTable<Row>) -> Vec<String> {
        names(&t.displayed_rows().into_iter().cloned().collect::<Vec<_>>())
    }

    fn emitted(cmd: Command<Message<Row>>) -> Option<Vec<String>> {
        match cmd.into_message() {
            Some(Message::SelectionChanged(rows)) => Some(names(&rows)),
            _ => None,
        }
    }

    fn key(c: char) -> Message<Row> {
        Message::KeyPress(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn code(code: KeyCode) -> Message<Row> {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn defaults_match_a_plain_table() {
        let t = DataTable::new(vec![user(1, "A", None)], columns());
        assert!(!t.selection().is_enabled());
        assert_eq!(t.header_check_state(), None);
        let t = table();
        assert_eq!(t.selection().mode(), SelectionMode::Multi);
        assert_eq!(t.sort_state(), &SortState::Unsorted);
        assert_eq!(displayed(&t), ["Carol", "alice", "Bob"]);
    }

    #[test]
    fn header_click_sorts_ascending() {
        let mut t = DataTable::new(vec![user(1, "B", None), user(2, "A", None)], columns());
        t.update(Message::Sort("name".into()));
        assert_eq!(displayed(&t), ["A", "B"]);
    }

    #[test]
    fn three_header_clicks_restore_input_order() {
        let mut t = table();
        t.update(Message::Sort("name".into()));
        assert_eq!(displayed(&t), ["alice", "Bob", "Carol"]);
        t.update(Message::Sort("name".into()));
        assert_eq!(displayed(&t), ["Carol", "Bob", "alice"]);
        t.update(Message::Sort("name".into()));
        assert_eq!(displayed(&t), ["Carol", "alice", "Bob"]);
        assert_eq!(t.sort_state(), &SortState::Unsorted);
    }

    #[test]
    fn missing_values_trail_in_both_directions() {
        let mut t = table();
        t.sort_by("salary");
        assert_eq!(displayed(&t), ["alice", "Carol", "Bob"]);
        t.sort_by("salary");
        assert_eq!(displayed(&t), ["Carol", "alice", "Bob"]);
    }

    #[test]
    fn non_sortable_header_is_ignored() {
        let mut t = table();
        t.update(Message::Sort("id".into()));
        assert_eq!(t.sort_state(), &SortState::Unsorted);
    }

    #[test]
    fn aria_sort_reports_active_and_sortable_columns() {
        let mut t = table();
        assert_eq!(t.aria_sort("name"), Some(AriaSort::None));
        assert_eq!(t.aria_sort("id"), None);
        t.sort_by("name");
        assert_eq!(t.aria_sort("name"), Some(AriaSort::Ascending));
        assert_eq!(t.aria_sort("salary"), Some(AriaSort::None));
        t.sort_by("name");
        assert_eq!(t.aria_sort("name"), Some(AriaSort::Descending));
    }

    #[test]
    fn toggling_rows_emits_selection_in_display_order() {
        let mut t = table();
        assert_eq!(emitted(t.update(Message::ToggleRow(2))), Some(vec!["Bob".to_string()]));
        assert_eq!(
            emitted(t.update(Message::ToggleRow(0))),
            Some(vec!["Carol".to_string(), "Bob".to_string()])
        );
        assert_eq!(emitted(t.update(Message::ToggleRow(0))), Some(vec!["Bob".to_string()]));
    }

    #[test]
    fn selection_survives_resorting() {
        let mut t = table();
        t.update(Message::ToggleRow(0));
        t.sort_by("name");
        assert!(t.is_row_selected(2));
        let payload = emitted(t.update(Message::ToggleRow(0)));
        assert_eq!(payload, Some(vec!["alice".to_string(), "Carol".to_string()]));
    }

    #[test]
    fn positional_identity_uses_input_positions() {
        let rows = vec![record([("name", "B".into())]), record([("name", "A".into())])];
        let mut t = DataTable::new(rows, vec![Column::new("name", "Name").sortable(true)])
            .with_row_key(RowKey::Positional)
            .with_selectable(true);
        t.update(Message::ToggleRow(0));
        t.sort_by("name");
        assert_eq!(names(&t.selected_rows().into_iter().cloned().collect::<Vec<_>>()), ["B"]);
        assert!(t.is_row_selected(1));
    }

    #[test]
    fn huge_numeric_ids_select_one_row_each() {
        let rows = vec![
            record([("id", 1e19.into()), ("name", "A".into())]),
            record([("id", 2e19.into()), ("name", "B".into())]),
        ];
        let mut t = DataTable::new(rows, columns()).with_selectable(true);
        assert_eq!(emitted(t.update(Message::ToggleRow(0))), Some(vec!["A".to_string()]));
        assert!(!t.is_row_selected(1));
    }

    #[test]
    fn single_select_keeps_the_latest_row() {
        let mut t = table().with_multi_select(false);
        t.update(Message::ToggleRow(0));
        let payload = emitted(t.update(Message::ToggleRow(1)));
        assert_eq!(payload, Some(vec!["alice".to_string()]));
        assert_eq!(t.selection().len(), 1);
        assert_eq!(t.header_check_state(), None);
    }

    #[test]
    fn select_all_then_again_clears() {
        let mut t =
            DataTable::new(vec![user(1, "A", None), user(2, "B", None)], columns()).with_selectable(true);
        assert_eq!(
            emitted(t.update(Message::ToggleAll)),
            Some(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(t.header_check_state(), Some(CheckState::Checked));
        assert_eq!(emitted(t.update(Message::ToggleAll)), Some(vec![]));
        assert!(t.selection().is_empty());
    }

    #[test]
    fn select_all_is_ignored_in_single_mode() {
        let mut t = table().with_multi_select(false);
        assert!(t.update(Message::ToggleAll).is_none());
        assert!(t.selection().is_empty());
    }

    #[test]
    fn unselectable_table_never_emits() {
        let mut t = table().with_selectable(false);
        assert!(t.update(Message::ToggleRow(0)).is_none());
        assert!(t.update(Message::ToggleAll).is_none());
        assert_eq!(t.header_check_state(), None);
    }

    #[test]
    fn rows_that_disappear_stay_selected_but_are_not_reported() {
        let mut t = table();
        t.update(Message::ToggleRow(0));
        t.set_rows(vec![user(2, "alice", None), user(3, "Bob", None)]);
        assert_eq!(t.header_check_state(), Some(CheckState::Unchecked));
        let payload = emitted(t.update(Message::ToggleRow(0)));
        assert_eq!(payload, Some(vec!["alice".to_string()]));
        assert_eq!(t.selection().len(), 2);

        t.set_rows(vec![user(1, "Carol", None), user(2, "alice", None)]);
        assert_eq!(t.header_check_state(), Some(CheckState::Checked));
    }

    #[test]
    fn header_checkbox_is_indeterminate_for_partial_selection() {
        let mut t = table();
        t.update(Message::ToggleRow(1));
        assert_eq!(t.header_check_state(), Some(CheckState::Indeterminate));
        assert!(render_component(&t, 40, 8).contains(CheckState::Indeterminate.symbol()));
    }

    #[test]
    fn keyboard_navigation_sorts_and_selects() {
        let mut t = table();
        t.focus();
        t.update(code(KeyCode::Down));
        assert_eq!(emitted(t.update(key(' '))), Some(vec!["alice".to_string()]));
        t.update(code(KeyCode::Right));
        t.update(code(KeyCode::Enter));
        assert_eq!(t.sort_state().column(), Some("salary"));
        assert_eq!(t.cursor(), 0);
        assert_eq!(emitted(t.update(key('a'))).map(|r| r.len()), Some(3));
    }

    #[test]
    fn modified_keys_do_not_trigger_table_bindings() {
        let mut t = table();
        t.focus();
        let ctrl_a = Message::KeyPress(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert!(t.update(ctrl_a).is_none());
        assert!(t.selection().is_empty());
        t.update(Message::KeyPress(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::ALT)));
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn keys_are_ignored_without_focus() {
        let mut t = table();
        assert!(t.update(key(' ')).is_none());
    }

    #[test]
    fn cursor_wraps() {
        let mut t = table();
        t.focus();
        t.update(code(KeyCode::Up));
        assert_eq!(t.cursor(), 2);
        t.update(code(KeyCode::Down));
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn loading_wins_over_empty_and_blocks_interaction() {
        let mut t = DataTable::new(Vec::<Row>::new(), columns()).with_loading(true);
        let out = render_component(&t, 40, 8);
        assert!(out.contains("Loading..."));
        assert!(!out.contains("No data available"));
        assert_eq!(t.subscriptions().len(), 1);

        let mut busy = table().with_loading(true);
        assert!(busy.update(Message::ToggleAll).is_none());
        busy.update(Message::Sort("name".into()));
        assert_eq!(busy.sort_state(), &SortState::Unsorted);

        t.set_loading(false);
        assert!(t.subscriptions().is_empty());
        assert!(render_component(&t, 40, 8).contains("No data available"));
    }

    #[test]
    fn custom_status_messages() {
        let t = DataTable::new(Vec::<Row>::new(), columns()).with_empty_message("Nobody here");
        assert!(render_component(&t, 40, 8).contains("Nobody here"));
        let t = table().with_loading(true).with_loading_message("Fetching users");
        assert!(render_component(&t, 40, 8).contains("⠋ Fetching users"));
    }

    #[test]
    fn renders_headers_indicators_and_checkboxes() {
        let mut t = table().with_title("Employees");
        t.sort_by("salary");
        t.update(Message::ToggleRow(0));
        let out = render_component(&t, 50, 8);
        assert!(out.contains("Employees"));
        assert!(out.contains("Salary ▲"));
        assert!(out.contains('☑'));
        assert!(out.contains('☐'));
        assert!(out.contains("alice"));
    }

    #[test]
    fn custom_renderer_gets_value_record_and_display_index() {
        let columns = vec![Column::new("salary", "Salary").render(|v: Option<&Value>, row: &Row, i| {
            let name = row.field("name").map(|n| n.to_string()).unwrap_or_default();
            match v {
                Some(v) => format!("{i}:{name}:${v}"),
                None => format!("{i}:{name}:-"),
            }
        })];
        let t = DataTable::new(vec![user(1, "Ada", Some(75000)), user(2, "Bo", None)], columns);
        let cell = |i: usize| t.columns()[0].cell_text(t.displayed_rows()[i], i);
        assert_eq!(cell(0), "0:Ada:$75000");
        assert_eq!(cell(1), "1:Bo:-");
    }

    struct Roster {
        table: DataTable<Row>,
        picked: Vec<String>,
    }

    #[derive(Debug)]
    enum RosterMsg {
        Table(Message<Row>),
    }

    impl Model for Roster {
        type Message = RosterMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<RosterMsg>) {
            let mut table = table();
            table.focus();
            (Roster { table, picked: Vec::new() }, Command::none())
        }

        fn update(&mut self, msg: RosterMsg) -> Command<RosterMsg> {
            match msg {
                RosterMsg::Table(Message::SelectionChanged(rows)) => {
                    self.picked = names(&rows);
                    Command::none()
                }
                RosterMsg::Table(m) => self.table.update(m).map(RosterMsg::Table),
            }
        }

        fn view(&self, frame: &mut Frame) {
            self.table.view(frame, frame.area());
        }
    }

    #[test]
    fn selection_reaches_the_owner_through_mapped_commands() {
        let mut prog = TestProgram::<Roster>::new(());
        prog.send(RosterMsg::Table(key('j')));
        prog.send(RosterMsg::Table(key(' ')));
        prog.drain_messages();
        assert_eq!(prog.model().picked, ["alice"]);

        prog.send(RosterMsg::Table(Message::Sort("name".into())));
        prog.send(RosterMsg::Table(Message::ToggleAll));
        prog.drain_messages();
        assert_eq!(prog.model().picked, ["alice", "Bob", "Carol"]);
        assert!(prog.render_string(40, 8).contains("Name ▲"));
    }

    #[test]
    fn accessible_labels() {
        let t = table();
        assert_eq!(t.select_all_label(), "Select all rows");
        assert_eq!(t.row_checkbox_label(0), "Select row 1");
    }
}
