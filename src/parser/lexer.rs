//! Lexer (tokenizer) for PIXEL lines
//!
//! Converts one line of PIXEL source into a flat [`Token`] stream consumed by
//! the recursive-descent parser in [`super::pixel`]. Whitespace only
//! separates tokens; it never produces one.

use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries the 1-based column where it starts so that syntax
/// errors can point into the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of ASCII letters (`R`, `GB`, `OFF`, ...), stored uppercased
    Letters(String, usize),
    /// A decimal repeat count
    Number(u32, usize),
    Plus(usize),   // +
    Star(usize),   // *
    LParen(usize), // (
    RParen(usize), // )
    Eof(usize),
}

impl Token {
    /// Returns the column where this token appears.
    pub fn column(&self) -> usize {
        match self {
            Token::Letters(_, col)
            | Token::Number(_, col)
            | Token::Plus(col)
            | Token::Star(col)
            | Token::LParen(col)
            | Token::RParen(col)
            | Token::Eof(col) => *col,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Letters(s, _) => write!(f, "'{}'", s),
            Token::Number(n, _) => write!(f, "number {}", n),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::Eof(_) => write!(f, "end of line"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub column: usize,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(line: &str) -> Self {
        Lexer {
            input: line.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the whole line. The result always ends with [`Token::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let column = self.position + 1;
            let Some(ch) = self.advance() else {
                tokens.push(Token::Eof(column));
                break;
            };

            let token = match ch {
                '+' => Token::Plus(column),
                '*' => Token::Star(column),
                '(' => Token::LParen(column),
                ')' => Token::RParen(column),
                c if c.is_ascii_digit() => self.number(c, column)?,
                c if c.is_ascii_alphabetic() => self.letters(c, column),
                other => {
                    return Err(LexError {
                        message: format!("Unexpected character '{}'", other),
                        column,
                    });
                }
            };
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn number(&mut self, first_digit: char, column: usize) -> Result<Token, LexError> {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = digits.parse::<u32>().map_err(|_| LexError {
            message: format!("Repeat count too large: {}", digits),
            column,
        })?;
        Ok(Token::Number(value, column))
    }

    fn letters(&mut self, first: char, column: usize) -> Token {
        let mut word = String::new();
        word.push(first.to_ascii_uppercase());

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphabetic() {
                word.push(ch.to_ascii_uppercase());
                self.advance();
            } else {
                break;
            }
        }

        Token::Letters(word, column)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }
}
