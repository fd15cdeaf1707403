// TUI widget modules for each screen zone.

pub mod file_panel;
pub mod header;
pub mod help_bar;
pub mod messages;
pub mod path_entry;
pub mod prompt_panel;
pub mod quit_confirm;
pub mod review_bar;
pub mod spinner;
pub mod typing_text;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

/// Style for an action key hint, dimmed when the action is unavailable.
pub fn action_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Rows by which the wrapped `body` overflows the inside of a bordered
/// `area`. `body` must not carry its own block.
pub fn overflow_rows(body: &Paragraph, area: Rect) -> usize {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = usize::from(area.height.saturating_sub(2));
    body.line_count(inner_width).saturating_sub(inner_height)
}

/// Compute a centered rectangle of the given size within `area`, clamped
/// to the available space.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

/// Rendered buffer as text, one line per row.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let result = centered_rect(30, 6, area);
        assert_eq!((result.width, result.height), (30, 6));
        assert_eq!(result.x, 25);
        assert_eq!(result.y, 9);
    }

    #[test]
    fn centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 10, 3);
        let result = centered_rect(30, 6, area);
        assert!(result.width <= area.width);
        assert!(result.height <= area.height);
    }

    #[test]
    fn overflow_counts_wrapped_rows() {
        let body = Paragraph::new("abcdefghijklmnopqrst\nx")
            .wrap(ratatui::widgets::Wrap { trim: false });
        // Inner width 5: four rows for the long word plus one for "x".
        assert_eq!(overflow_rows(&body, Rect::new(0, 0, 7, 4)), 3);
        assert_eq!(overflow_rows(&body, Rect::new(0, 0, 7, 20)), 0);
        // No inner width at all.
        assert_eq!(overflow_rows(&body, Rect::new(0, 0, 2, 4)), 0);
    }

    #[test]
    fn action_style_dims_disabled() {
        assert_eq!(action_style(false).fg, Some(Color::DarkGray));
        assert!(action_style(true).add_modifier.contains(Modifier::BOLD));
    }
}
