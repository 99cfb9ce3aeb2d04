//! Labeled single-line input with clear, password reveal, loading and
//! validation affordances.
//!
//! The field either owns its value ([`InputField::uncontrolled`]) or displays
//! a value owned by its parent ([`InputField::controlled`]). The choice is
//! made once, at construction. In both modes every user edit is reported as
//! [`Message::Changed`]; a controlled field only shows the new text after the
//! parent hands it back through [`InputField::set_value`].
//!
//! ```rust,ignore
//! fn update(&mut self, msg: Msg) -> Command<Msg> {
//!     match msg {
//!         Msg::Name(input_field::Message::Changed(ev)) => {
//!             self.name = ev.value.clone();
//!             self.name_field.set_value(ev.value);
//!             Command::none()
//!         }
//!         Msg::Name(m) => self.name_field.update(m).map(Msg::Name),
//!     }
//! }
//! ```

use crate::chrome::{self, FieldPalette, Variant};
use crate::key::{Binding, KeyCombination, KeyMap};
use crate::spinner::{self, Spinner};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tabula_core::{Command, Component, Subscription};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Who owns the displayed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOwnership {
    /// The parent owns the value and feeds it back with `set_value`.
    Controlled { value: String },
    /// The field owns the value, seeded once at construction.
    Uncontrolled { internal: String },
}

/// What kind of text the field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldType {
    #[default]
    Text,
    /// Obscured unless revealed.
    Password,
    Email,
    /// Accepts digits, sign, decimal point and exponent characters only.
    Number,
}

/// Field size: horizontal padding inside the border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Size {
    fn padding(self) -> u16 {
        match self {
            Size::Sm => 0,
            Size::Md => 1,
            Size::Lg => 2,
        }
    }
}

/// What triggered a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    Typed,
    Pasted,
    Cleared,
}

/// A requested change of the field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub value: String,
    pub origin: ChangeOrigin,
}

/// The message shown below the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback<'a> {
    /// Validation error, presented as an alert.
    Error(&'a str),
    Helper(&'a str),
    None,
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Paste(String),
    /// Activate the clear affordance.
    Clear,
    /// Activate the password reveal affordance.
    TogglePassword,
    /// Outbound: the user asked for a new value.
    Changed(ChangeEvent),
    Spinner(spinner::Message),
}

pub struct InputFieldKeyBindings {
    /// Default: Ctrl+X
    pub clear: Binding,
    /// Default: Ctrl+R
    pub toggle_password: Binding,
}

impl Default for InputFieldKeyBindings {
    fn default() -> Self {
        Self {
            clear: Binding::new(KeyCombination::ctrl(KeyCode::Char('x')), "clear"),
            toggle_password: Binding::new(KeyCombination::ctrl(KeyCode::Char('r')), "reveal"),
        }
    }
}

impl KeyMap for InputFieldKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.clear, &self.toggle_password]
    }
}

#[derive(Debug, Clone)]
pub struct InputFieldStyle {
    pub label: Style,
    pub text: Style,
    pub placeholder: Style,
    pub cursor: Style,
    pub helper: Style,
    pub error: Style,
    /// Clear and reveal affordances.
    pub affordance: Style,
    /// Patched over label and text when disabled.
    pub disabled: Style,
    pub border: FieldPalette,
}

impl Default for InputFieldStyle {
    fn default() -> Self {
        Self {
            label: Style::default().add_modifier(Modifier::BOLD),
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            helper: Style::default().fg(Color::Gray),
            error: Style::default().fg(Color::Red),
            affordance: Style::default().fg(Color::Gray),
            disabled: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            border: FieldPalette::default(),
        }
    }
}

pub struct InputField {
    ownership: ValueOwnership,
    /// Char index into the displayed value; clamped on use.
    cursor: usize,
    focus: bool,
    label: String,
    placeholder: String,
    helper_text: Option<String>,
    error_message: Option<String>,
    id: Option<String>,
    disabled: bool,
    invalid: bool,
    loading: bool,
    variant: Variant,
    size: Size,
    field_type: FieldType,
    show_clear: bool,
    show_password_toggle: bool,
    password_visible: bool,
    mask: char,
    style: InputFieldStyle,
    key_bindings: InputFieldKeyBindings,
    spinner: Spinner,
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl InputField {
    /// An uncontrolled field starting empty.
    pub fn new() -> Self {
        Self::uncontrolled("")
    }

    /// A field that owns its value, seeded with `default_value`.
    pub fn uncontrolled(default_value: impl Into<String>) -> Self {
        Self::with_ownership(ValueOwnership::Uncontrolled {
            internal: default_value.into(),
        })
    }

    /// A field that displays `value` until the parent supplies another.
    pub fn controlled(value: impl Into<String>) -> Self {
        Self::with_ownership(ValueOwnership::Controlled { value: value.into() })
    }

    fn with_ownership(ownership: ValueOwnership) -> Self {
        let cursor = match &ownership {
            ValueOwnership::Controlled { value } => value.chars().count(),
            ValueOwnership::Uncontrolled { internal } => internal.chars().count(),
        };
        Self {
            ownership,
            cursor,
            focus: false,
            label: String::new(),
            placeholder: String::new(),
            helper_text: None,
            error_message: None,
            id: None,
            disabled: false,
            invalid: false,
            loading: false,
            variant: Variant::default(),
            size: Size::default(),
            field_type: FieldType::default(),
            show_clear: true,
            show_password_toggle: false,
            password_visible: false,
            mask: '•',
            style: InputFieldStyle::default(),
            key_bindings: InputFieldKeyBindings::default(),
            spinner: Spinner::new("input-field"),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Names the field; also keys its spinner timer and the described-by ids.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.spinner.set_id(format!("{id}-spinner"));
        self.id = Some(id);
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Offer the clear affordance when the field has a value. Default true.
    pub fn with_show_clear(mut self, show: bool) -> Self {
        self.show_clear = show;
        self
    }

    /// Offer the reveal affordance on password fields. Default false.
    pub fn with_show_password_toggle(mut self, show: bool) -> Self {
        self.show_password_toggle = show;
        self
    }

    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_style(mut self, style: InputFieldStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_key_bindings(mut self, key_bindings: InputFieldKeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn key_bindings(&self) -> &InputFieldKeyBindings {
        &self.key_bindings
    }

    pub fn ownership(&self) -> &ValueOwnership {
        &self.ownership
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.ownership, ValueOwnership::Controlled { .. })
    }

    /// The value currently shown: the parent's value when controlled, the
    /// field's own value otherwise.
    pub fn display_value(&self) -> &str {
        match &self.ownership {
            ValueOwnership::Controlled { value } => value,
            ValueOwnership::Uncontrolled { internal } => internal,
        }
    }

    /// Replace the shown value. Controlled parents call this with the value
    /// from [`Message::Changed`] once they accept it.
    pub fn set_value(&mut self, value: impl Into<String>) {
        match &mut self.ownership {
            ValueOwnership::Controlled { value: v } => *v = value.into(),
            ValueOwnership::Uncontrolled { internal } => *internal = value.into(),
        }
        self.cursor = self.cursor.min(self.display_value().chars().count());
    }

    pub fn set_error_message(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.spinner.set_spinning(loading);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_password_visible(&self) -> bool {
        self.password_visible
    }

    /// Report a user edit. An uncontrolled field takes the new text first;
    /// a controlled one leaves its display untouched.
    pub fn edit(&mut self, text: impl Into<String>) -> Command<Message> {
        self.apply_edit(text.into(), ChangeOrigin::Typed)
    }

    fn apply_edit(&mut self, value: String, origin: ChangeOrigin) -> Command<Message> {
        if let ValueOwnership::Uncontrolled { internal } = &mut self.ownership {
            internal.clone_from(&value);
        }
        tracing::debug!(
            id = self.id.as_deref().unwrap_or(""),
            ?origin,
            controlled = self.is_controlled(),
            "input value edited"
        );
        Command::message(Message::Changed(ChangeEvent { value, origin }))
    }

    pub fn clear_visible(&self) -> bool {
        !self.disabled && !self.loading && self.show_clear && !self.display_value().is_empty()
    }

    pub fn clear_label(&self) -> &'static str {
        "Clear input"
    }

    /// Activate the clear affordance; ignored while it is hidden.
    pub fn clear(&mut self) -> Command<Message> {
        if !self.clear_visible() {
            tracing::trace!("clear ignored: affordance hidden");
            return Command::none();
        }
        self.cursor = 0;
        self.apply_edit(String::new(), ChangeOrigin::Cleared)
    }

    /// Visible on password fields with the toggle enabled, whether or not
    /// the field is loading or disabled.
    pub fn password_toggle_visible(&self) -> bool {
        self.field_type == FieldType::Password && self.show_password_toggle
    }

    pub fn password_toggle_label(&self) -> &'static str {
        if self.password_visible {
            "Hide password"
        } else {
            "Show password"
        }
    }

    pub fn toggle_password(&mut self) {
        if !self.password_toggle_visible() {
            return;
        }
        self.password_visible = !self.password_visible;
        tracing::debug!(visible = self.password_visible, "password visibility toggled");
    }

    /// `"loading"` while the busy indicator is shown.
    pub fn status_label(&self) -> Option<&'static str> {
        self.loading.then_some("loading")
    }

    /// The error replaces the helper text.
    pub fn feedback(&self) -> Feedback<'_> {
        match (&self.error_message, &self.helper_text) {
            (Some(err), _) => Feedback::Error(err),
            (None, Some(help)) => Feedback::Helper(help),
            (None, None) => Feedback::None,
        }
    }

    /// Id of the element describing the field: `"{id}-error"` or
    /// `"{id}-helper"`, following [`feedback`](Self::feedback).
    pub fn described_by(&self) -> Option<String> {
        let id = self.id.as_deref()?;
        match self.feedback() {
            Feedback::Error(_) => Some(format!("{id}-error")),
            Feedback::Helper(_) => Some(format!("{id}-helper")),
            Feedback::None => None,
        }
    }

    fn obscured(&self) -> bool {
        self.field_type == FieldType::Password && !self.password_visible
    }

    fn accepts(&self, c: char) -> bool {
        match self.field_type {
            FieldType::Number => c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'),
            _ => !c.is_control(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if self.key_bindings.toggle_password.matches(&key) {
            self.toggle_password();
            return Command::none();
        }
        if self.key_bindings.clear.matches(&key) {
            return self.clear();
        }
        if self.disabled {
            return Command::none();
        }

        let mut chars: Vec<char> = self.display_value().chars().collect();
        let mut cursor = self.cursor.min(chars.len());
        let changed = match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) if self.accepts(c) => {
                chars.insert(cursor, c);
                cursor += 1;
                true
            }
            (KeyCode::Backspace, KeyModifiers::NONE) if cursor > 0 => {
                cursor -= 1;
                chars.remove(cursor);
                true
            }
            (KeyCode::Delete, KeyModifiers::NONE) if cursor < chars.len() => {
                chars.remove(cursor);
                true
            }
            (KeyCode::Char('w'), m) if m.contains(KeyModifiers::CONTROL) && cursor > 0 => {
                let start = word_start(&chars, cursor);
                chars.drain(start..cursor);
                cursor = start;
                true
            }
            (KeyCode::Char('u'), m) if m.contains(KeyModifiers::CONTROL) && cursor > 0 => {
                chars.drain(..cursor);
                cursor = 0;
                true
            }
            (KeyCode::Left, _) => {
                cursor = cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                cursor = (cursor + 1).min(chars.len());
                false
            }
            (KeyCode::Home, _) => {
                cursor = 0;
                false
            }
            (KeyCode::Char('a'), m) if m.contains(KeyModifiers::CONTROL) => {
                cursor = 0;
                false
            }
            (KeyCode::End, _) => {
                cursor = chars.len();
                false
            }
            (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => {
                cursor = chars.len();
                false
            }
            _ => false,
        };
        self.cursor = cursor;
        if changed {
            self.apply_edit(chars.into_iter().collect(), ChangeOrigin::Typed)
        } else {
            Command::none()
        }
    }

    fn paste(&mut self, text: &str) -> Command<Message> {
        let pasted: Vec<char> = text.chars().filter(|&c| self.accepts(c)).collect();
        if pasted.is_empty() {
            return Command::none();
        }
        let mut chars: Vec<char> = self.display_value().chars().collect();
        let cursor = self.cursor.min(chars.len());
        chars.splice(cursor..cursor, pasted.iter().copied());
        self.cursor = cursor + pasted.len();
        self.apply_edit(chars.into_iter().collect(), ChangeOrigin::Pasted)
    }

    fn field_height(&self) -> u16 {
        match self.variant {
            Variant::Outlined => 3,
            Variant::Filled | Variant::Ghost => 2,
        }
    }

    /// Rows needed to draw the label, field and feedback line.
    pub fn height(&self) -> u16 {
        let label = u16::from(!self.label.is_empty());
        let feedback = u16::from(self.feedback() != Feedback::None);
        label + self.field_height() + feedback
    }

    fn affordances(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        if self.loading {
            spans.push(Span::styled(self.spinner.frame(), self.spinner.style()));
        }
        if self.clear_visible() {
            spans.push(Span::styled("\u{2715}", self.style.affordance));
        }
        if self.password_toggle_visible() {
            let text = if self.password_visible { "hide" } else { "show" };
            spans.push(Span::styled(text, self.style.affordance));
        }
        spans
    }

    fn text_line(&self, width: usize) -> Line<'static> {
        let text_style = if self.disabled {
            self.style.text.patch(self.style.disabled)
        } else {
            self.style.text
        };
        let shown: Vec<char> = if self.obscured() {
            self.display_value().chars().map(|_| self.mask).collect()
        } else {
            self.display_value().chars().collect()
        };
        let editing = self.focus && !self.disabled;

        if shown.is_empty() {
            let mut spans = Vec::new();
            if editing {
                spans.push(Span::styled(" ", self.style.cursor));
            }
            spans.push(Span::styled(self.placeholder.clone(), self.style.placeholder));
            return Line::from(spans);
        }
        if !editing {
            return Line::from(Span::styled(shown.into_iter().collect::<String>(), text_style));
        }

        let cursor = self.cursor.min(shown.len());
        let start = scroll_start(&shown, cursor, width);
        let before: String = shown[start..cursor].iter().collect();
        let under = shown.get(cursor).map_or_else(|| " ".to_string(), char::to_string);
        let after: String = shown.get(cursor + 1..).unwrap_or_default().iter().collect();
        Line::from(vec![
            Span::styled(before, text_style),
            Span::styled(under, self.style.cursor),
            Span::styled(after, text_style),
        ])
    }
}

/// First char of the word ending at `cursor`, skipping trailing spaces.
fn word_start(chars: &[char], cursor: usize) -> usize {
    let mut i = cursor;
    while i > 0 && chars[i - 1] == ' ' {
        i -= 1;
    }
    while i > 0 && chars[i - 1] != ' ' {
        i -= 1;
    }
    i
}

/// First visible char so that everything from it through the cursor cell
/// fits in `width` columns.
fn scroll_start(chars: &[char], cursor: usize, width: usize) -> usize {
    let cell = |c: &char| c.width().unwrap_or(0);
    let mut used = chars.get(cursor).map_or(1, |c| cell(c).max(1));
    let mut start = cursor;
    while start > 0 {
        let w = cell(&chars[start - 1]);
        if used + w > width {
            break;
        }
        used += w;
        start -= 1;
    }
    start
}

impl Component for InputField {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => {
                if !self.focus {
                    return Command::none();
                }
                self.handle_key(key)
            }
            Message::Paste(text) => {
                if !self.focus || self.disabled {
                    return Command::none();
                }
                self.paste(&text)
            }
            Message::Clear => self.clear(),
            Message::TogglePassword => {
                self.toggle_password();
                Command::none()
            }
            Message::Changed(_) => Command::none(),
            Message::Spinner(m) => self.spinner.update(m).map(Message::Spinner),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let label_height = u16::from(!self.label.is_empty());
        let feedback = self.feedback();
        let feedback_height = u16::from(feedback != Feedback::None);
        let [label_area, field_area, feedback_area] = Layout::vertical([
            Constraint::Length(label_height),
            Constraint::Length(self.field_height()),
            Constraint::Length(feedback_height),
        ])
        .areas(area);

        if label_height > 0 {
            let style = if self.disabled {
                self.style.label.patch(self.style.disabled)
            } else {
                self.style.label
            };
            frame.render_widget(Paragraph::new(Span::styled(self.label.clone(), style)), label_area);
        }

        let invalid = self.invalid || self.error_message.is_some();
        let block = chrome::field_block(self.variant, &self.style.border, self.focus, invalid, self.disabled);
        let inner = block.inner(field_area);
        frame.render_widget(block, field_area);

        let pad = self.size.padding();
        let content = Rect {
            x: inner.x.saturating_add(pad),
            width: inner.width.saturating_sub(pad * 2),
            height: inner.height.min(1),
            ..inner
        };
        let affordances = self.affordances();
        let affordance_width: usize = affordances.iter().map(|s| s.content.width() + 1).sum();
        let [text_area, affordance_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(affordance_width as u16)])
                .areas(content);

        frame.render_widget(Paragraph::new(self.text_line(text_area.width as usize)), text_area);
        if !affordances.is_empty() {
            let mut spans = Vec::with_capacity(affordances.len() * 2);
            for span in affordances {
                spans.push(Span::raw(" "));
                spans.push(span);
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), affordance_area);
        }

        match feedback {
            Feedback::Error(msg) => frame.render_widget(
                Paragraph::new(Span::styled(msg.to_string(), self.style.error)),
                feedback_area,
            ),
            Feedback::Helper(msg) => frame.render_widget(
                Paragraph::new(Span::styled(msg.to_string(), self.style.helper)),
                feedback_area,
            ),
            Feedback::None => {}
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
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
