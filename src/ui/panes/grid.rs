//! Board and goal pane rendering
//!
//! Grids are drawn two terminal columns per cell. Mazes get one extra text
//! row and column per cell for walls; the turtle is drawn as an arrow.

use crate::grid::maze::{ItemKind, MazeState};
use crate::grid::{Grid, Position};
use crate::ui::theme::{cell_color, DEFAULT_THEME};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn pane_block(title: &str, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Text lines of a grid; `marker` outlines one cell (the last painted one).
pub fn grid_lines(grid: &Grid, marker: Option<Position>) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(grid.rows() + 1);

    let mut header = vec![Span::raw("   ")];
    for col in 0..grid.cols() {
        header.push(Span::styled(
            format!("{:<2}", col % 10),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }
    lines.push(Line::from(header));

    for (row, cells) in grid.iter_rows().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{:>2} ", row),
            Style::default().fg(DEFAULT_THEME.comment),
        )];
        for (col, cell) in cells.iter().enumerate() {
            let marked = marker == Some(Position::new(row, col));
            let span = match cell {
                Some(color) if marked => Span::styled(
                    "▐▌",
                    Style::default()
                        .fg(DEFAULT_THEME.turtle)
                        .bg(cell_color(*color)),
                ),
                Some(color) => Span::styled("██", Style::default().fg(cell_color(*color))),
                None => Span::styled("· ", Style::default().fg(DEFAULT_THEME.unlit)),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }
    lines
}

pub fn render_grid_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    grid: Option<&Grid>,
    marker: Option<Position>,
    is_focused: bool,
) {
    let block = pane_block(title, is_focused);
    let paragraph = match grid {
        Some(grid) if grid.rows() > 0 && grid.cols() > 0 => {
            Paragraph::new(grid_lines(grid, marker)).block(block)
        }
        _ => Paragraph::new(Line::styled(
            "no grid",
            Style::default().fg(DEFAULT_THEME.comment),
        ))
        .alignment(Alignment::Center)
        .block(block),
    };
    frame.render_widget(paragraph, area);
}

/// Text lines of a maze: a wall row above every cell row, a closing row at
/// the bottom.
pub fn maze_lines(maze: &MazeState) -> Vec<Line<'static>> {
    let wall = Style::default().fg(DEFAULT_THEME.wall);
    let exit = Style::default()
        .fg(DEFAULT_THEME.success)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::with_capacity(maze.rows() * 2 + 1);
    if maze.cols() == 0 {
        return lines;
    }

    for row in 0..maze.rows() {
        let mut top = Vec::with_capacity(maze.cols() * 2 + 1);
        let mut middle = Vec::with_capacity(maze.cols() * 2 + 1);
        for col in 0..maze.cols() {
            let pos = Position::new(row, col);
            let walls = maze.walls(pos);
            let is_exit = maze.exit == Some(pos);

            top.push(Span::styled("+", wall));
            top.push(match (walls.top, is_exit && row == 0) {
                (true, _) => Span::styled("--", wall),
                (false, true) => Span::styled("^^", exit),
                (false, false) => Span::raw("  "),
            });

            middle.push(match (walls.left, is_exit && col == 0) {
                (true, _) => Span::styled("|", wall),
                (false, true) => Span::styled("<", exit),
                (false, false) => Span::raw(" "),
            });
            middle.push(cell_span(maze, pos));
        }
        top.push(Span::styled("+", wall));

        let last = Position::new(row, maze.cols() - 1);
        middle.push(match (maze.walls(last).right, maze.exit == Some(last)) {
            (true, _) => Span::styled("|", wall),
            (false, true) => Span::styled(">", exit),
            (false, false) => Span::raw(" "),
        });

        lines.push(Line::from(top));
        lines.push(Line::from(middle));
    }

    if maze.rows() > 0 {
        let row = maze.rows() - 1;
        let mut bottom = Vec::with_capacity(maze.cols() * 2 + 1);
        for col in 0..maze.cols() {
            let pos = Position::new(row, col);
            bottom.push(Span::styled("+", wall));
            bottom.push(match (maze.walls(pos).bottom, maze.exit == Some(pos)) {
                (true, _) => Span::styled("--", wall),
                (false, true) => Span::styled("vv", exit),
                (false, false) => Span::raw("  "),
            });
        }
        bottom.push(Span::styled("+", wall));
        lines.push(Line::from(bottom));
    }
    lines
}

fn cell_span(maze: &MazeState, pos: Position) -> Span<'static> {
    let base = if maze.visited.contains(&pos) {
        Style::default().bg(DEFAULT_THEME.visited_bg)
    } else {
        Style::default()
    };

    if maze.turtle.position == pos {
        let arrow = maze.turtle.heading.arrow();
        return Span::styled(
            format!("{} ", arrow),
            base.fg(DEFAULT_THEME.turtle).add_modifier(Modifier::BOLD),
        );
    }
    match maze.item_at(pos) {
        Some(item) if !item.collected => match item.kind {
            ItemKind::Leaf => Span::styled("♣ ", base.fg(DEFAULT_THEME.success)),
            ItemKind::Carrot => Span::styled("▲ ", base.fg(DEFAULT_THEME.secondary)),
        },
        _ => Span::styled("  ", base),
    }
}

pub fn render_maze_pane(frame: &mut Frame, area: Rect, maze: Option<&MazeState>, is_focused: bool) {
    let block = pane_block("Maze", is_focused);
    let paragraph = match maze {
        Some(maze) => Paragraph::new(maze_lines(maze)).block(block),
        None => Paragraph::new("no maze").block(block),
    };
    frame.render_widget(paragraph, area);
}
