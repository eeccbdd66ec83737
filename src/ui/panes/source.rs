//! Source code pane rendering with syntax highlighting
//!
//! Renders the example's listing with line numbers, a category marker in the
//! gutter, basic C syntax highlighting, and the active line highlighted. The
//! active line is kept at a fixed visual row while stepping.

use crate::trace::CodeLine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for a line of C
fn highlight_source_code(line: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;
    let mut chars = line.char_indices().peekable();

    let flush_word =
        |spans: &mut Vec<Span<'static>>, start: Option<usize>, end: usize, is_func: bool| {
            if let Some(start) = start {
                let word = &line[start..end];
                spans.push(Span::styled(word.to_string(), get_keyword_style(word, is_func)));
            }
        };

    while let Some((i, c)) = chars.next() {
        // Comments run to the end of the line
        if c == '/' && chars.peek().is_some_and(|&(_, next)| next == '/') {
            flush_word(&mut spans, word_start.take(), i, false);
            spans.push(Span::styled(
                line[i..].to_string(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return spans;
        }

        if c == '"' || c == '\'' {
            flush_word(&mut spans, word_start.take(), i, false);
            let mut end = line.len();
            let mut escaped = false;
            for (j, d) in chars.by_ref() {
                if escaped {
                    escaped = false;
                } else if d == '\\' {
                    escaped = true;
                } else if d == c {
                    end = j + d.len_utf8();
                    break;
                }
            }
            spans.push(Span::styled(
                line[i..end].to_string(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            continue;
        }

        if c.is_alphanumeric() || c == '_' {
            word_start.get_or_insert(i);
            continue;
        }

        flush_word(&mut spans, word_start.take(), i, c == '(');
        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary), // Brackets
            '#' => Style::default().fg(DEFAULT_THEME.keyword),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
    }

    flush_word(&mut spans, word_start, line.len(), false);
    spans
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "int" | "char" | "void" | "bool" | "float" | "double" | "long" | "short" | "unsigned"
        | "signed" => Style::default().fg(DEFAULT_THEME.type_name),
        "return" | "if" | "else" | "while" | "for" | "do" | "switch" | "case" | "default"
        | "break" | "continue" | "include" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ if word.chars().all(|c| c.is_ascii_digit() || c == '.') => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

impl SourceScrollState {
    pub fn new() -> Self {
        SourceScrollState {
            offset: 0,
            target_line_row: None, // centered on first render
        }
    }
}

impl Default for SourceScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub code: &'a [CodeLine],
    pub current_line: usize,
    pub is_playing: bool,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_lines = data.code.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders, min 1

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if let Some(idx) = data
        .code
        .iter()
        .position(|line| line.line_number == data.current_line)
    {
        scroll_state.offset = idx.saturating_sub(target_row);
    }
    let max_scroll = total_lines.saturating_sub(visible_height);
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    let visible_lines: Vec<Line> = data
        .code
        .iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|line| {
            let is_current = line.line_number == data.current_line;
            let (num_style, marker) = if is_current {
                let arrow_color = if data.is_playing {
                    DEFAULT_THEME.success
                } else {
                    DEFAULT_THEME.secondary
                };
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Span::styled("▶", Style::default().fg(arrow_color)),
                )
            } else {
                (Style::default().fg(DEFAULT_THEME.comment), Span::raw(" "))
            };

            let gutter = if line.category.is_some() { "▍" } else { " " };
            let mut spans = vec![
                Span::styled(format!("{:4} ", line.line_number), num_style),
                marker,
                Span::styled(
                    gutter,
                    Style::default().fg(DEFAULT_THEME.category(line.category)),
                ),
            ];

            let mut content = highlight_source_code(&line.code);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content {
                    span.style = span.style.patch(bg);
                }
            }
            spans.extend(content);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn highlighting_preserves_text() {
        for line in [
            "    printf(\"%.2f dollars\\n\", dollars);",
            "int main() { // entry",
            "char c = 'x';",
            "    printf(\"שלום\");",
            "",
        ] {
            assert_eq!(text(&highlight_source_code(line)), line);
        }
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let spans = highlight_source_code("printf(\"oops");
        assert_eq!(text(&spans), "printf(\"oops");
        assert_eq!(spans.last().map(|s| s.content.as_ref()), Some("\"oops"));
    }
}
