//! Border and panel helpers shared by the widgets.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

/// Visual treatment of an input field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Shaded background, underline only.
    Filled,
    /// Full rounded border.
    #[default]
    Outlined,
    /// No border until focused.
    Ghost,
}

/// Border colors by field state.
#[derive(Debug, Clone)]
pub struct FieldPalette {
    pub normal: Color,
    pub focused: Color,
    pub invalid: Color,
    pub disabled: Color,
    /// Background of [`Variant::Filled`] fields.
    pub fill: Color,
}

impl Default for FieldPalette {
    fn default() -> Self {
        Self {
            normal: Color::Gray,
            focused: Color::Cyan,
            invalid: Color::Red,
            disabled: Color::DarkGray,
            fill: Color::Indexed(236),
        }
    }
}

/// Block drawn around an input field. Invalid wins over focus, disabled wins
/// over both.
pub fn field_block(
    variant: Variant,
    palette: &FieldPalette,
    focused: bool,
    invalid: bool,
    disabled: bool,
) -> Block<'static> {
    let color = if disabled {
        palette.disabled
    } else if invalid {
        palette.invalid
    } else if focused {
        palette.focused
    } else {
        palette.normal
    };
    let border = Style::default().fg(color);
    match variant {
        Variant::Outlined => Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border),
        Variant::Filled => Block::new()
            .borders(Borders::BOTTOM)
            .border_style(border)
            .style(Style::default().bg(palette.fill)),
        Variant::Ghost if focused || invalid => Block::new().borders(Borders::BOTTOM).border_style(border),
        Variant::Ghost => Block::new(),
    }
}

/// Bordered block with a focus-dependent border color.
pub fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::new()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color))
}

/// A `width` x `height` rect centered in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Render `lines` centered vertically and horizontally in `area`, dimmed.
/// Used for loading and empty placeholders.
pub fn status_panel(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let height = (lines.len() as u16).min(area.height);
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let paragraph = Paragraph::new(lines)
        .centered()
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, middle);
}
