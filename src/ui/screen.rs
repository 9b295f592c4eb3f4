use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthChar;

use super::view::TerminalView;
use super::{Styles, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::compare::Verdict;
use crate::presenter::Tone;

/// Centered block of `height` rows inside `area`
fn centered_rows(area: Rect, height: u16) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    chunks[1]
}

pub fn render_start(view: &TerminalView, area: Rect, buf: &mut Buffer) {
    let styles = Styles::default();
    let lines = vec![
        Line::from(Span::styled("typerush", styles.title)),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "Type as many sentences as you can in {} seconds.",
                view.time_limit_secs
            ),
            styles.bold,
        )),
        Line::default(),
        Line::from(Span::styled("(enter) start / (esc)ape", styles.italic)),
    ];
    let height = lines.len() as u16;

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(centered_rows(area, height), buf);
}

pub fn render_game(view: &TerminalView, area: Rect, buf: &mut Buffer) {
    let styles = Styles::default();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_width: usize = view
        .sentence
        .iter()
        .map(|c| c.width().unwrap_or(0))
        .sum();
    let prompt_occupied_lines = if prompt_width <= max_chars_per_line as usize {
        1
    } else {
        ((prompt_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // stats
            Constraint::Length(1),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Length(1),
            Constraint::Length(1), // input
            Constraint::Length(1), // status
            Constraint::Length(1),
            Constraint::Length(1), // legend
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!(
            "{}s left   {} wpm   {}% acc",
            view.time_remaining_secs, view.wpm, view.accuracy
        ),
        styles.dim_bold,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let cursor = view.cursor();
    let spans = view
        .sentence
        .iter()
        .zip(view.verdicts.iter())
        .enumerate()
        .map(|(idx, (expected, verdict))| match verdict {
            Verdict::Correct => Span::styled(expected.to_string(), styles.correct),
            Verdict::Incorrect => Span::styled(
                match *expected {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                styles.incorrect,
            ),
            Verdict::Pending if Some(idx) == cursor => {
                Span::styled(expected.to_string(), styles.cursor)
            }
            Verdict::Pending => Span::styled(expected.to_string(), styles.dim_bold),
        })
        .collect::<Vec<Span>>();

    Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    // keep the tail of long input visible
    let visible = max_chars_per_line.saturating_sub(2) as usize;
    let typed: Vec<char> = view.input().chars().collect();
    let tail: String = typed[typed.len().saturating_sub(visible)..].iter().collect();
    Paragraph::new(Line::from(vec![
        Span::styled("> ", styles.dim_bold),
        Span::styled(tail, styles.bold),
    ]))
    .render(chunks[5], buf);

    let status_style = match view.tone {
        Tone::Neutral => styles.italic,
        Tone::Success => styles.success,
    };
    Paragraph::new(Span::styled(view.status.clone(), status_style))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

    Paragraph::new(Span::styled("(esc) cancel", styles.italic)).render(chunks[8], buf);
}

pub fn render_result(view: &TerminalView, area: Rect, buf: &mut Buffer) {
    let styles = Styles::default();
    let summary = view.final_results.unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled("time's up", styles.title)),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "{} wpm   {}% acc   {} chars",
                summary.wpm, summary.accuracy, summary.total_chars_typed
            ),
            styles.bold,
        )),
        Line::default(),
        Line::from(Span::styled(
            "(r) play again / (h)ome / (esc)ape",
            styles.italic,
        )),
    ];
    let height = lines.len() as u16;

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(centered_rows(area, height), buf);
}
