//! Explanation pane: what the current step does and what its line means

use crate::trace::{CodeLine, ExecutionStep};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

pub struct ExplainRenderData<'a> {
    pub step: &'a ExecutionStep,
    pub line: Option<&'a CodeLine>,
}

pub fn render_explain_pane(frame: &mut Frame, area: Rect, data: ExplainRenderData) {
    let block = Block::default()
        .title(" Explanation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("Line {}: ", data.step.line_number),
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            data.step.description.clone(),
            Style::default().fg(DEFAULT_THEME.fg),
        ),
    ])];

    if let Some(line) = data.line {
        if let Some(category) = line.category {
            lines.push(Line::from(Span::styled(
                format!("[{}]", category),
                Style::default().fg(DEFAULT_THEME.category(Some(category))),
            )));
        }
        if !line.explanation.is_empty() {
            lines.push(Line::from(Span::styled(
                line.explanation.clone(),
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
    }

    if let Some(request) = &data.step.input_request {
        lines.push(Line::from(vec![
            Span::styled("⌨ ", Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(
                format!("reads {} ({})", request.key, request.prompt),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
