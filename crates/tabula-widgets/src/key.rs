//! Configurable key bindings and the help line built from them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// One or more key combinations bound to a described action.
pub struct Binding {
    pub keys: Vec<KeyCombination>,
    /// Shown in help lines.
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

/// Shift already shapes the character of a `Char` key.
fn significant(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    }
}

/// A key plus the modifiers that must be held with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Binding {
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Whether `event` matches any of the combinations. Modifiers must match
    /// exactly, except that Shift is ignored on character keys.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled
            && self.keys.iter().any(|k| {
                k.code == event.code
                    && significant(k.code, k.modifiers) == significant(event.code, event.modifiers)
            })
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// `"space toggle"`, `"↑/k up"`: the keys joined by `/`, then the
    /// description.
    pub fn help_label(&self) -> String {
        let keys = self
            .keys
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");
        format!("{keys} {}", self.description)
    }
}

impl KeyCombination {
    pub fn new(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::SHIFT)
    }

    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("alt+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Up => f.write_str("\u{2191}"),
            KeyCode::Down => f.write_str("\u{2193}"),
            KeyCode::Left => f.write_str("\u{2190}"),
            KeyCode::Right => f.write_str("\u{2192}"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("del"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Esc => f.write_str("esc"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Types that group key bindings for a help line.
pub trait KeyMap {
    /// The bindings worth showing in a one-line help footer.
    fn short_help(&self) -> Vec<&Binding>;

    /// `short_help` rendered as `"↑/k up • space toggle"`.
    fn help_line(&self) -> String {
        self.short_help()
            .into_iter()
            .filter(|b| b.enabled)
            .map(Binding::help_label)
            .collect::<Vec<_>>()
            .join(" \u{2022} ")
    }
}
