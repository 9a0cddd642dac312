//! Arithmetic expression evaluator
//!
//! A closed grammar over numeric literals, `+ - * /`, unary signs and
//! parentheses. There are no names, calls or other operators, so an
//! equation cannot do anything but compute a number.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')* primary
//! primary := NUMBER | '(' expr ')'
//! ```

use std::fmt;

use thiserror::Error;

/// Maximum parenthesis nesting
pub const MAX_NESTING: usize = 200;

/// Errors raised while parsing or evaluating an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("invalid numeric literal '{0}'")]
    InvalidLiteral(String),

    #[error("unexpected {token} at offset {offset}")]
    UnexpectedToken { token: Token, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,

    #[error("parentheses nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Lexical token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

/// Evaluate an arithmetic expression
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some((token, offset)) => Err(EvalError::UnexpectedToken { token, offset }),
    }
}

/// Split an expression into tokens paired with their byte offsets
pub fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut end = offset;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() || (c == '.' && !input[offset..i].contains('.')) {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Number(parse_literal(&input[offset..end])?)
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ch => return Err(EvalError::UnexpectedChar { ch, offset }),
        };

        if !matches!(token, Token::Number(_)) {
            chars.next();
        }
        tokens.push((token, offset));
    }

    Ok(tokens)
}

/// Parse one decimal literal: `12`, `1.5`, `1.` or `.5`
///
/// Integer literals may not carry leading zeros (`05`), though a run of
/// zeros alone is fine.
fn parse_literal(literal: &str) -> Result<f64, EvalError> {
    let invalid = || EvalError::InvalidLiteral(literal.to_string());

    if !literal.bytes().any(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if !literal.contains('.')
        && literal.len() > 1
        && literal.starts_with('0')
        && literal.bytes().any(|b| b != b'0')
    {
        return Err(invalid());
    }

    literal.parse::<f64>().map_err(|_| invalid())
}

struct Parser<'a> {
    tokens: &'a [(Token, usize)],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<(Token, usize)> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some((token @ (Token::Plus | Token::Minus), _)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if token == Token::Plus {
                value + rhs
            } else {
                value - rhs
            };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some((token @ (Token::Star | Token::Slash), _)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if token == Token::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                value / rhs
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        let mut negate = false;
        while let Some((token @ (Token::Plus | Token::Minus), _)) = self.peek() {
            self.pos += 1;
            if token == Token::Minus {
                negate = !negate;
            }
        }
        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some((Token::Number(n), _)) => Ok(n),
            Some((Token::LParen, _)) => {
                self.depth += 1;
                if self.depth > MAX_NESTING {
                    return Err(EvalError::NestingTooDeep(MAX_NESTING));
                }
                let value = self.expr()?;
                match self.advance() {
                    Some((Token::RParen, _)) => {
                        self.depth -= 1;
                        Ok(value)
                    }
                    Some((token, offset)) => Err(EvalError::UnexpectedToken { token, offset }),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some((token, offset)) => Err(EvalError::UnexpectedToken { token, offset }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}
