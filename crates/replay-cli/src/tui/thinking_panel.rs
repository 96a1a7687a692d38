//! The right-hand panel: structured rendering of the selected turn's
//! thinking payload.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use replay_core::{Prediction, Section, TableData};
use replay_engine::SelectedView;

use crate::render::{bold_segments, cell_text};

const HIGHLIGHT_COLOR: Color = Color::Green;
const BAR_WIDTH: usize = 20;

/// Draw the panel. With no selection a placeholder invites the user to
/// pick a message.
pub(super) fn draw(frame: &mut Frame<'_>, area: Rect, view: Option<&SelectedView>) {
    let block = Block::default().borders(Borders::ALL).title("Thinking");

    let Some(view) = view else {
        let placeholder = Paragraph::new(vec![
            Line::default(),
            Line::from("💭"),
            Line::from(Span::styled(
                "Select an agent message to inspect its thinking.",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(Span::styled(
        view.thinking.title.clone(),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));
    lines.push(Line::default());

    // Agent comment above the sections, as in the original panel.
    if !view.text.is_empty() {
        lines.push(Line::from(Span::styled(
            "DiVE Agent Comment",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(view.text.clone()));
        lines.push(Line::default());
    }

    for section in &view.thinking.sections {
        push_section(&mut lines, section);
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

fn push_section(lines: &mut Vec<Line<'static>>, section: &Section) {
    lines.push(Line::from(Span::styled(
        section.heading.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));

    if let Some(content) = &section.content {
        lines.push(rich_line(content));
    }

    for inference in section.inferences.iter().flatten() {
        let mut spans = vec![
            Span::raw("• "),
            Span::styled(
                inference.heading.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(": "),
        ];
        spans.extend(rich_line(&inference.content).spans);
        lines.push(Line::from(spans));
    }

    if let Some(table) = &section.table {
        push_table(lines, table);
    }

    for prediction in section.predictions.iter().flatten() {
        lines.push(prediction_line(prediction));
    }

    lines.push(Line::default());
}

/// Inline `**bold**` markers as bold spans.
fn rich_line(text: &str) -> Line<'static> {
    let spans = bold_segments(text)
        .into_iter()
        .map(|(segment, bold)| {
            if bold {
                Span::styled(segment, Style::default().add_modifier(Modifier::BOLD))
            } else {
                Span::raw(segment)
            }
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// Fixed-width table: column widths fit the widest cell.
fn push_table(lines: &mut Vec<Line<'static>>, table: &TableData) {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .map(|col| {
            table
                .rows
                .iter()
                .map(|row| cell_text(row.get(col)).chars().count())
                .chain(std::iter::once(col.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, width)| format!("{col:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(Line::from(Span::styled(
        header,
        Style::default().add_modifier(Modifier::BOLD),
    )));

    for row in &table.rows {
        let cells = table
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, width)| format!("{:<width$}", cell_text(row.get(col))))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(Line::from(cells));
    }
}

fn prediction_line(prediction: &Prediction) -> Line<'static> {
    let filled = usize::from(prediction.score.min(100)).saturating_mul(BAR_WIDTH) / 100;
    let bar = format!(
        "{}{} {:>3}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH.saturating_sub(filled)),
        prediction.score
    );
    let style = if prediction.is_high_score() {
        Style::default()
            .fg(HIGHLIGHT_COLOR)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Line::from(vec![
        Span::raw(format!("{:<32} ", prediction.product)),
        Span::styled(bar, style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_line_splits_bold_runs() {
        let line = rich_line("a **big** deal");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "big");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn table_columns_align_to_widest_cell() {
        let table = TableData {
            columns: vec!["Appliance".to_string(), "Uses".to_string()],
            rows: vec![
                serde_json::from_str(r#"{"Appliance": "Dishwasher", "Uses": 18}"#).unwrap(),
                serde_json::from_str(r#"{"Appliance": "Washer", "Uses": 31}"#).unwrap(),
            ],
        };
        let mut lines = Vec::new();
        push_table(&mut lines, &table);
        assert_eq!(lines.len(), 3);
        // Header pads "Appliance" to the width of "Dishwasher".
        assert!(lines[0].spans[0].content.starts_with("Appliance "));
    }

    #[test]
    fn prediction_bar_highlights_high_scores() {
        let line = prediction_line(&Prediction {
            product: "Washer".to_string(),
            score: 93,
        });
        assert_eq!(line.spans[1].style.fg, Some(HIGHLIGHT_COLOR));

        let dim = prediction_line(&Prediction {
            product: "Styler".to_string(),
            score: 41,
        });
        assert!(dim.spans[1].style.add_modifier.contains(Modifier::DIM));
    }
}
