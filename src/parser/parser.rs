//! Per-mode line grammars
//!
//! TABLE `rows#cols` / `count color row col`, GRID `count color dx dy`,
//! MAZE `ruota n` / `muovi n`, MATRIX `+ 3` / `- C`. PIXEL lines are handed to
//! [`super::pixel::PixelParser`].

use crate::grid::Color;
use crate::parser::command::{Command, CommandKind, Mode, ToggleOp};
use crate::parser::pixel::PixelParser;
use thiserror::Error;

/// Syntax error for a single source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error on line {line}: {message}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl ParseError {
    /// `line_index` is 0-based; the stored line number is 1-based.
    pub fn new(line_index: usize, message: impl Into<String>) -> Self {
        ParseError {
            line: line_index + 1,
            message: message.into(),
        }
    }
}

/// Parse one trimmed, non-empty source line under the grammar of `mode`.
///
/// PIXEL lines may produce several commands (or none, for a line holding only
/// separators); every other grammar produces exactly one.
pub fn parse_line(text: &str, line: usize, mode: Mode) -> Result<Vec<Command>, ParseError> {
    let kinds = match mode {
        Mode::Table | Mode::Grid => {
            if text.contains('#') {
                vec![parse_dimensions(text, line)?]
            } else if mode == Mode::Table {
                vec![parse_table_paint(text, line)?]
            } else {
                vec![parse_grid_paint(text, line)?]
            }
        }
        Mode::Maze => vec![parse_maze(text, line)?],
        Mode::Matrix => vec![parse_matrix(text, line)?],
        Mode::Pixel => PixelParser::new(text, line)?
            .parse_line()?
            .into_iter()
            .map(CommandKind::Pixel)
            .collect(),
    };

    Ok(kinds
        .into_iter()
        .map(|kind| Command::new(kind, line, text))
        .collect())
}

/// `rows#cols`
fn parse_dimensions(text: &str, line: usize) -> Result<CommandKind, ParseError> {
    let (rows, cols) = text.split_once('#').ok_or_else(|| {
        ParseError::new(line, "Expected dimensions as rows#cols")
    })?;
    let rows = parse_positive(rows.trim(), line, "row count")?;
    let cols = parse_positive(cols.trim(), line, "column count")?;
    Ok(CommandKind::Start { rows, cols })
}

/// `count color row col`
fn parse_table_paint(text: &str, line: usize) -> Result<CommandKind, ParseError> {
    let [count, color, row, col] = split_fields::<4>(text, line, "count color row col")?;
    Ok(CommandKind::Color {
        count: parse_unsigned(count, line, "count")?,
        color: parse_primary(color, line)?,
        row: parse_unsigned(row, line, "row")?,
        col: parse_unsigned(col, line, "column")?,
    })
}

/// `count color dx dy`
fn parse_grid_paint(text: &str, line: usize) -> Result<CommandKind, ParseError> {
    let [count, color, dx, dy] = split_fields::<4>(text, line, "count color dx dy")?;
    Ok(CommandKind::GridColor {
        count: parse_unsigned(count, line, "count")?,
        color: parse_primary(color, line)?,
        dx: parse_signed(dx, line, "dx")?,
        dy: parse_signed(dy, line, "dy")?,
    })
}

/// `ruota {1|2|3}` or `muovi n`
fn parse_maze(text: &str, line: usize) -> Result<CommandKind, ParseError> {
    let [keyword, arg] = split_fields::<2>(text, line, "ruota n or muovi n")?;
    match keyword.to_ascii_lowercase().as_str() {
        "ruota" => match arg {
            "1" => Ok(CommandKind::Rotate { degrees: 90 }),
            "2" => Ok(CommandKind::Rotate { degrees: 180 }),
            "3" => Ok(CommandKind::Rotate { degrees: 270 }),
            other => Err(ParseError::new(
                line,
                format!("ruota takes 1, 2 or 3, found '{}'", other),
            )),
        },
        "muovi" => {
            let steps = arg.parse::<u32>().map_err(|_| {
                ParseError::new(line, format!("muovi takes a step count, found '{}'", arg))
            })?;
            Ok(CommandKind::Move { steps })
        }
        other => Err(ParseError::new(
            line,
            format!("Unknown instruction '{}' (expected ruota or muovi)", other),
        )),
    }
}

/// `+ 3`, `-C`
fn parse_matrix(text: &str, line: usize) -> Result<CommandKind, ParseError> {
    let mut chars = text.chars();
    let op = match chars.next() {
        Some('+') => ToggleOp::On,
        Some('-') => ToggleOp::Off,
        _ => {
            return Err(ParseError::new(
                line,
                "Expected '+' or '-' followed by a row (1-8) or column (A-H)",
            ));
        }
    };

    let target = chars.as_str().trim();
    let mut target_chars = target.chars();
    let (Some(t), None) = (target_chars.next(), target_chars.next()) else {
        return Err(ParseError::new(
            line,
            format!("Expected a single row (1-8) or column (A-H), found '{}'", target),
        ));
    };

    match t.to_ascii_uppercase() {
        d @ '1'..='8' => Ok(CommandKind::MatrixToggle {
            op,
            is_row: true,
            index: (d as u8 - b'1') as usize,
        }),
        c @ 'A'..='H' => Ok(CommandKind::MatrixToggle {
            op,
            is_row: false,
            index: (c as u8 - b'A') as usize,
        }),
        _ => Err(ParseError::new(
            line,
            format!("'{}' is not a row (1-8) or column (A-H)", t),
        )),
    }
}

fn split_fields<'a, const N: usize>(
    text: &'a str,
    line: usize,
    shape: &str,
) -> Result<[&'a str; N], ParseError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    fields.try_into().map_err(|fields: Vec<&str>| {
        ParseError::new(
            line,
            format!("Expected {} fields ({}), found {}", N, shape, fields.len()),
        )
    })
}

fn parse_primary(field: &str, line: usize) -> Result<Color, ParseError> {
    let mut chars = field.chars();
    match (chars.next().and_then(Color::from_primary), chars.next()) {
        (Some(color), None) => Ok(color),
        _ => Err(ParseError::new(
            line,
            format!("Unknown color '{}' (use R, G or B)", field),
        )),
    }
}

fn parse_unsigned(field: &str, line: usize, what: &str) -> Result<usize, ParseError> {
    field.parse::<usize>().map_err(|_| {
        ParseError::new(
            line,
            format!("Expected a non-negative integer for {}, found '{}'", what, field),
        )
    })
}

fn parse_positive(field: &str, line: usize, what: &str) -> Result<usize, ParseError> {
    match field.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::new(
            line,
            format!("Expected a positive integer for {}, found '{}'", what, field),
        )),
    }
}

fn parse_signed(field: &str, line: usize, what: &str) -> Result<i64, ParseError> {
    field.parse::<i64>().map_err(|_| {
        ParseError::new(
            line,
            format!("Expected an integer for {}, found '{}'", what, field),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::command::PixelOp;

    fn kinds(text: &str, mode: Mode) -> Vec<CommandKind> {
        parse_line(text, 0, mode)
            .unwrap()
            .into_iter()
            .map(|c| c.kind)
            .collect()
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(
            kinds("5#7", Mode::Table),
            vec![CommandKind::Start { rows: 5, cols: 7 }]
        );
        assert_eq!(
            kinds("3 # 4", Mode::Grid),
            vec![CommandKind::Start { rows: 3, cols: 4 }]
        );
        assert!(parse_line("0#4", 0, Mode::Table).is_err());
        assert!(parse_line("5#5", 0, Mode::Matrix).is_err());
    }

    #[test]
    fn test_parse_table_paint() {
        assert_eq!(
            kinds("3 r 0 2", Mode::Table),
            vec![CommandKind::Color {
                count: 3,
                color: Color::Red,
                row: 0,
                col: 2
            }]
        );
        assert!(parse_line("3 Y 0 0", 0, Mode::Table).is_err());
        assert!(parse_line("3 R 0", 0, Mode::Table).is_err());
        assert!(parse_line("3 R -1 0", 0, Mode::Table).is_err());
    }

    #[test]
    fn test_parse_grid_paint() {
        assert_eq!(
            kinds("2 G -1 3", Mode::Grid),
            vec![CommandKind::GridColor {
                count: 2,
                color: Color::Green,
                dx: -1,
                dy: 3
            }]
        );
    }

    #[test]
    fn test_parse_maze() {
        assert_eq!(
            kinds("ruota 3", Mode::Maze),
            vec![CommandKind::Rotate { degrees: 270 }]
        );
        assert_eq!(
            kinds("MUOVI 4", Mode::Maze),
            vec![CommandKind::Move { steps: 4 }]
        );
        assert!(parse_line("ruota 4", 0, Mode::Maze).is_err());
        assert!(parse_line("salta 1", 0, Mode::Maze).is_err());
    }

    #[test]
    fn test_parse_matrix() {
        assert_eq!(
            kinds("+ 8", Mode::Matrix),
            vec![CommandKind::MatrixToggle {
                op: ToggleOp::On,
                is_row: true,
                index: 7
            }]
        );
        assert_eq!(
            kinds("-c", Mode::Matrix),
            vec![CommandKind::MatrixToggle {
                op: ToggleOp::Off,
                is_row: false,
                index: 2
            }]
        );
        assert!(parse_line("+ 9", 0, Mode::Matrix).is_err());
        assert!(parse_line("+ I", 0, Mode::Matrix).is_err());
        assert!(parse_line("* 1", 0, Mode::Matrix).is_err());
        assert!(parse_line("+ 12", 0, Mode::Matrix).is_err());
    }

    #[test]
    fn test_parse_pixel_line_keeps_source() {
        let commands = parse_line("R + G", 4, Mode::Pixel).unwrap();
        assert_eq!(commands.len(), 2);
        assert!(commands.iter().all(|c| c.line == 4 && c.text == "R + G"));
        assert_eq!(commands[1].kind, CommandKind::Pixel(PixelOp::Paint(Color::Green)));
    }

    #[test]
    fn test_error_names_one_based_line() {
        let err = parse_line("bogus", 2, Mode::Maze).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.to_string().starts_with("Syntax error on line 3"));
    }
}
