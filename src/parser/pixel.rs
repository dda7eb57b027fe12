//! Recursive-descent parser for PIXEL lines
//!
//! Grammar (one line):
//!
//! ```text
//! sequence := { '+' } [ item { { '+' } item } ] { '+' }
//! item     := LETTERS | NUMBER '*' '(' sequence ')'
//! ```
//!
//! A letter run of `R`, `G`, `B` paints the additive mix of the letters
//! present; `OFF` or `O` erases. Parenthesis depth is tracked explicitly so
//! that both a stray `)` and a missing `)` are reported as unbalanced.

use super::command::PixelOp;
use super::lexer::{Lexer, Token};
use super::parser::ParseError;
use crate::grid::Color;

pub struct PixelParser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    line: usize,
}

impl PixelParser {
    /// `line` is the 0-based source line, used for error messages.
    pub fn new(text: &str, line: usize) -> Result<Self, ParseError> {
        let tokens = Lexer::new(text).tokenize().map_err(|e| {
            ParseError::new(line, format!("{} at column {}", e.message, e.column))
        })?;
        Ok(PixelParser {
            tokens,
            position: 0,
            depth: 0,
            line,
        })
    }

    /// Parse the whole line into a (possibly nested) operation list.
    pub fn parse_line(&mut self) -> Result<Vec<PixelOp>, ParseError> {
        let ops = self.parse_sequence()?;
        match self.peek() {
            Token::Eof(_) => Ok(ops),
            Token::RParen(col) => Err(self.error(format!(
                "Unbalanced parentheses: unexpected ')' at column {}",
                col
            ))),
            other => Err(self.unexpected(&other.clone())),
        }
    }

    fn parse_sequence(&mut self) -> Result<Vec<PixelOp>, ParseError> {
        let mut ops = Vec::new();
        loop {
            match self.peek() {
                Token::Plus(_) => {
                    self.advance();
                }
                Token::Letters(..) | Token::Number(..) => ops.push(self.parse_item()?),
                // ')' and end of line both close a sequence; the caller decides
                // whether that is legal at the current depth
                Token::RParen(_) | Token::Eof(_) => return Ok(ops),
                other => return Err(self.unexpected(&other.clone())),
            }
        }
    }

    fn parse_item(&mut self) -> Result<PixelOp, ParseError> {
        match self.advance() {
            Token::Letters(word, col) => self.parse_letters(&word, col),
            Token::Number(count, _) => self.parse_loop(count),
            other => Err(self.unexpected(&other)),
        }
    }

    fn parse_letters(&self, word: &str, col: usize) -> Result<PixelOp, ParseError> {
        if word == "OFF" || word == "O" {
            return Ok(PixelOp::Skip);
        }

        let (mut red, mut green, mut blue) = (false, false, false);
        for letter in word.chars() {
            match letter {
                'R' => red = true,
                'G' => green = true,
                'B' => blue = true,
                _ => {
                    return Err(self.error(format!(
                        "Unknown color '{}' at column {} (use R, G, B or OFF)",
                        word, col
                    )));
                }
            }
        }

        // a non-empty word of R/G/B always mixes into some color
        Color::mix(red, green, blue)
            .map(PixelOp::Paint)
            .ok_or_else(|| self.error(format!("Unknown color '{}'", word)))
    }

    fn parse_loop(&mut self, count: u32) -> Result<PixelOp, ParseError> {
        match self.advance() {
            Token::Star(_) => {}
            other => {
                return Err(self.error(format!(
                    "Expected '*' after repeat count {}, found {}",
                    count, other
                )));
            }
        }
        match self.advance() {
            Token::LParen(_) => {}
            other => {
                return Err(self.error(format!(
                    "Expected '(' after '{} *', found {}",
                    count, other
                )));
            }
        }

        self.depth += 1;
        let body = self.parse_sequence()?;

        match self.advance() {
            Token::RParen(_) => {
                self.depth -= 1;
                Ok(PixelOp::Loop(count, body))
            }
            _ => Err(self.error(format!(
                "Unbalanced parentheses: {} '(' left open",
                self.depth
            ))),
        }
    }

    fn peek(&self) -> &Token {
        // tokenize() always ends with Eof and advance() never moves past it
        &self.tokens[self.position]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if !matches!(token, Token::Eof(_)) {
            self.position += 1;
        }
        token
    }

    fn unexpected(&self, token: &Token) -> ParseError {
        self.error(format!(
            "Unexpected {} at column {}",
            token,
            token.column()
        ))
    }

    fn error(&self, message: String) -> ParseError {
        ParseError::new(self.line, message)
    }
}

/// Expand loops into primitive operations.
///
/// Expansion stops once `limit` primitives have been produced; a line never
/// shows more than 16 of them, so the tail is unobservable.
pub fn flatten(ops: &[PixelOp], limit: usize) -> Vec<PixelOp> {
    let mut out = Vec::new();
    flatten_into(ops, limit, &mut out);
    out
}

fn flatten_into(ops: &[PixelOp], limit: usize, out: &mut Vec<PixelOp>) {
    for op in ops {
        if out.len() >= limit {
            return;
        }
        match op {
            PixelOp::Loop(count, body) => {
                for _ in 0..*count {
                    if out.len() >= limit {
                        return;
                    }
                    let before = out.len();
                    flatten_into(body, limit, out);
                    // an empty body never grows; don't spin on huge counts
                    if out.len() == before {
                        break;
                    }
                }
            }
            primitive => out.push(primitive.clone()),
        }
    }
}
