use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};

/// Terminal input delivered through [`terminal_events`](crate::subscriptions::terminal_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key press (release and repeat events are filtered out).
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// Convert a raw crossterm event, dropping the kinds widgets never act on.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::Event;
        match event {
            Event::Key(k) if k.kind == KeyEventKind::Press => Some(TerminalEvent::Key(k)),
            Event::Key(_) => None,
            Event::Mouse(m) => Some(TerminalEvent::Mouse(m)),
            Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            Event::Paste(s) => Some(TerminalEvent::Paste(s)),
            Event::FocusGained | Event::FocusLost => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn press_is_kept() {
        assert!(matches!(
            TerminalEvent::from_crossterm(key(KeyEventKind::Press)),
            Some(TerminalEvent::Key(_))
        ));
    }

    #[test]
    fn release_is_dropped() {
        assert!(TerminalEvent::from_crossterm(key(KeyEventKind::Release)).is_none());
    }

    #[test]
    fn focus_events_are_dropped() {
        assert!(TerminalEvent::from_crossterm(Event::FocusGained).is_none());
    }

    #[test]
    fn paste_is_kept() {
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Paste("abc".into())),
            Some(TerminalEvent::Paste("abc".into()))
        );
    }
}
