//! Status bar and info pane rendering

use crate::challenge::Challenge;
use crate::interpreter::engine::{Completion, Phase};
use crate::parser::command::Mode;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, snapshot: &Snapshot) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let failed = snapshot.completion == Completion::Failure || snapshot.error.is_some();
    let badge_bg = if failed {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.primary
    };

    let left_spans = vec![
        Span::styled(
            format!(" {} {}/{} ", snapshot.mode, snapshot.pc, snapshot.command_count),
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if failed {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            .alignment(Alignment::Left),
        layout[0],
    );

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut keys = vec![("→/s", "step"), ("⎵", "play"), ("r/R", "reset"), ("n", "goal")];
    if snapshot.mode == Mode::Maze {
        keys.push(("w", "save"));
    }
    keys.push(("↵", "submit"));
    keys.push(("q", "quit"));

    let mut right_spans = Vec::new();
    for (index, (key, desc)) in keys.into_iter().enumerate() {
        if index > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }

    let badge = match snapshot.phase {
        Phase::Running => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        Phase::Halted(Completion::Success) => Some((" EXIT ", DEFAULT_THEME.success)),
        Phase::Halted(_) => Some((" HALTED ", DEFAULT_THEME.error)),
        Phase::Loaded if snapshot.pc >= snapshot.command_count => {
            Some((" END ", DEFAULT_THEME.comment))
        }
        Phase::Loaded if snapshot.pc == 0 => Some((" START ", DEFAULT_THEME.success)),
        _ => None,
    };
    if let Some((label, color)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            label,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            .alignment(Alignment::Right),
        layout[1],
    );
}

/// Score, per-mode counters, challenge clock and the last error.
pub fn info_lines(snapshot: &Snapshot, challenge: Option<&Challenge>) -> Vec<Line<'static>> {
    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default()
        .fg(DEFAULT_THEME.fg)
        .add_modifier(Modifier::BOLD);
    let row = |name: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{:<10}", name), label),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![row("Score", format!("{}", snapshot.score))];
    match snapshot.mode {
        Mode::Grid => lines.push(row("Moves", snapshot.total_movements.to_string())),
        Mode::Maze => {
            if let Some(maze) = &snapshot.maze {
                let left = maze.items.iter().filter(|item| !item.collected).count();
                lines.push(row("Items left", left.to_string()));
                lines.push(row("Heading", maze.turtle.heading.to_string()));
            }
        }
        _ => {}
    }

    if let Some(challenge) = challenge {
        let clock_style = if challenge.is_expired() {
            Style::default().fg(DEFAULT_THEME.error)
        } else {
            value
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", "Time"), label),
            Span::styled(challenge.clock(), clock_style),
        ]));
        lines.push(row(
            "Best",
            challenge
                .best_score
                .map_or_else(|| "-".to_string(), |best| best.to_string()),
        ));
        if challenge.is_locked_out() {
            lines.push(row("Locked", format!("{}s", challenge.lockout)));
        }
    }

    if let Some(error) = &snapshot.error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            error.clone(),
            Style::default().fg(DEFAULT_THEME.error),
        ));
    }
    lines
}

pub fn render_info_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    challenge: Option<&Challenge>,
) {
    let title = if challenge.is_some() {
        " Challenge "
    } else {
        " Info "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));
    frame.render_widget(
        Paragraph::new(info_lines(snapshot, challenge))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::engine::ProgramState;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_info_shows_challenge_clock() {
        let snapshot = Snapshot::capture(&ProgramState::new(Mode::Pixel), 7.25);
        let challenge = Challenge::new(Mode::Pixel, None, None, Some(125));
        let lines = info_lines(&snapshot, Some(&challenge));
        assert_eq!(text(&lines[0]), "Score     7.25");
        assert_eq!(text(&lines[1]), "Time      02:05");
        assert_eq!(text(&lines[2]), "Best      -");
    }

    #[test]
    fn test_info_shows_error() {
        let mut state = ProgramState::new(Mode::Table);
        state.error = Some("Line 2: boom".to_string());
        let lines = info_lines(&Snapshot::capture(&state, 0.0), None);
        assert_eq!(text(lines.last().unwrap()), "Line 2: boom");
    }
}
