// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Header: title, description, version (3 rows)      |
// +-------------------------+------------------------+
// | Prompt panel (fill)      | Messages (fill)        |
// |                          |                        |
// +- File panel (5 rows) ---+- Review bar (3 rows) --+
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// App title, description and the version switch.
    pub header: Rect,
    /// Left column top: generated prompt, editor, or user guide.
    pub prompt_panel: Rect,
    /// Left column bottom: selected file and the Generate Prompt action.
    pub file_panel: Rect,
    /// Right column top: generated reviews.
    pub messages: Rect,
    /// Right column bottom: the Generate Review action.
    pub review_bar: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(8),    // columns
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let header = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(middle);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(columns[1]);

    AppLayout {
        header,
        prompt_panel: left[0],
        file_panel: left[1],
        messages: right[0],
        review_bar: right[1],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
