//! Program output pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Split accumulated output chunks into display lines.
///
/// Each chunk starts its own line, matching how a step's output is shown
/// as one entry. Newlines inside a chunk split it further; one trailing
/// newline does not produce an empty line.
pub fn terminal_lines(outputs: &[String]) -> Vec<String> {
    outputs
        .iter()
        .filter(|chunk| !chunk.is_empty())
        .flat_map(|chunk| {
            chunk
                .strip_suffix('\n')
                .unwrap_or(chunk.as_str())
                .split('\n')
                .map(str::to_string)
        })
        .collect()
}

/// Render the output pane from the player's accumulated output
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    outputs: &[String],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = terminal_lines(outputs);
    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    // Follow the newest output unless the user scrolled up
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(max_scroll - *scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(line).style(Style::default().fg(DEFAULT_THEME.fg)))
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
