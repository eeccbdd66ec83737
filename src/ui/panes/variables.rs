//! Variables pane rendering
//!
//! One row per variable in the current step's snapshot: name, type and
//! value. The variable the step touched gets a highlighted row.

use crate::trace::{Value, VarType, VariableSnapshot};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Data needed to render the variables pane
pub struct VariablesRenderData<'a> {
    pub variables: &'a [VariableSnapshot],
    pub highlighted: Option<&'a str>,
}

/// Quotes follow the declared type: numbers kept as preformatted text
/// (`"370.00"` for a float) are shown bare.
fn value_span(value: &Value, var_type: VarType) -> Span<'static> {
    let style = match value {
        Value::Uninitialized => Style::default()
            .fg(DEFAULT_THEME.uninit)
            .add_modifier(Modifier::ITALIC),
        Value::Number(_) => Style::default().fg(DEFAULT_THEME.number),
        Value::Text(_) if var_type.is_numeric() => Style::default().fg(DEFAULT_THEME.number),
        Value::Text(_) => Style::default().fg(DEFAULT_THEME.string),
        Value::Bool(_) => Style::default().fg(DEFAULT_THEME.keyword),
    };
    let text = match (value, var_type) {
        (Value::Uninitialized, _) => value.to_string(),
        (_, VarType::String) => format!("\"{}\"", value),
        (_, VarType::Char) => format!("'{}'", value),
        _ => value.to_string(),
    };
    Span::styled(text, style)
}

/// Render the variables pane
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    data: VariablesRenderData,
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
        .title(" Variables ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.variables.is_empty() {
        let paragraph = Paragraph::new("(no variables yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let name_width = data
        .variables
        .iter()
        .map(|v| v.name.chars().count())
        .max()
        .unwrap_or(0);
    let type_width = data
        .variables
        .iter()
        .map(|v| v.var_type.keyword().len())
        .max()
        .unwrap_or(0);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = (*scroll_offset).min(data.variables.len().saturating_sub(visible_height));

    let lines: Vec<Line> = data
        .variables
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|var| {
            let is_highlighted = data.highlighted == Some(var.name.as_str());
            let mut spans = vec![
                Span::styled(
                    format!("{:<width$} ", var.var_type.keyword(), width = type_width),
                    Style::default().fg(DEFAULT_THEME.type_name),
                ),
                Span::styled(
                    format!("{:<width$}", var.name, width = name_width),
                    Style::default()
                        .fg(DEFAULT_THEME.fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                value_span(&var.value, var.var_type),
            ];
            if is_highlighted {
                spans.push(Span::styled(" ◀", Style::default().fg(DEFAULT_THEME.secondary)));
                let bg = Style::default().bg(DEFAULT_THEME.highlight_bg);
                for span in &mut spans {
                    span.style = span.style.patch(bg);
                }
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_follow_the_declared_type() {
        assert_eq!(
            value_span(&Value::from("85,90"), VarType::String).content,
            "\"85,90\""
        );
        assert_eq!(value_span(&Value::from("x"), VarType::Char).content, "'x'");
        assert_eq!(value_span(&Value::Number(3.7), VarType::Float).content, "3.7");
        assert_eq!(
            value_span(&Value::Uninitialized, VarType::String).content,
            "[uninit]"
        );
    }

    #[test]
    fn preformatted_floats_are_not_quoted() {
        assert_eq!(
            value_span(&Value::from("370.00"), VarType::Float).content,
            "370.00"
        );
        assert_eq!(
            value_span(&Value::from("84.33"), VarType::Float).content,
            "84.33"
        );
    }
}
