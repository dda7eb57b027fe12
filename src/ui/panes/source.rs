//! Source pane rendering with per-mode highlighting
//!
//! Shows the loaded program with line numbers, the line the next step runs
//! and, after a runtime failure, the failing line in the error style.

use crate::grid::Color as CellColor;
use crate::ui::theme::{cell_color, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split a program line into styled words, numbers and punctuation.
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let len = if c.is_ascii_alphanumeric() {
            rest.find(|ch: char| !ch.is_ascii_alphanumeric())
                .unwrap_or(rest.len())
        } else {
            c.len_utf8()
        };
        let (token, tail) = rest.split_at(len);
        spans.push(Span::styled(token, token_style(token)));
        rest = tail;
    }

    Line::from(spans)
}

fn token_style(token: &str) -> Style {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return Style::default().fg(DEFAULT_THEME.number);
    }
    match token.to_ascii_lowercase().as_str() {
        "ruota" | "muovi" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "off" | "o" => Style::default().fg(DEFAULT_THEME.comment),
        "+" | "-" | "*" | "#" => Style::default().fg(DEFAULT_THEME.secondary),
        "(" | ")" => Style::default().fg(DEFAULT_THEME.primary),
        word => match color_of_letters(word) {
            Some(color) => Style::default()
                .fg(cell_color(color))
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(DEFAULT_THEME.fg),
        },
    }
}

/// Color a run of primary letters mixes to, if it is one.
fn color_of_letters(word: &str) -> Option<CellColor> {
    if word.is_empty() {
        return None;
    }
    let (mut red, mut green, mut blue) = (false, false, false);
    for c in word.chars() {
        match c {
            'r' => red = true,
            'g' => green = true,
            'b' => blue = true,
            _ => return None,
        }
    }
    CellColor::mix(red, green, blue)
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source pane. `current_line` is 1-based; 0 means none.
#[allow(clippy::too_many_arguments)]
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    source_code: &str,
    current_line: usize,
    is_error: bool,
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
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let (num_style, content_style) = match (is_current, is_error) {
                (true, true) => (
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                    Some(
                        Style::default()
                            .bg(DEFAULT_THEME.error)
                            .fg(ratatui::style::Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ),
                (true, false) => (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    None,
                ),
                _ => (Style::default().fg(DEFAULT_THEME.comment), None),
            };

            let mut content_line = highlight_source_code(line);
            match content_style {
                Some(style) => {
                    for span in &mut content_line.spans {
                        span.style = style;
                    }
                }
                None if is_current => {
                    let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                    for span in &mut content_line.spans {
                        span.style = span.style.patch(bg);
                    }
                }
                None => {}
            }

            let marker = if is_current { "▶" } else { " " };
            let mut spans = vec![Span::styled(format!("{:3} {}", line_num, marker), num_style)];
            spans.extend(content_line.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
