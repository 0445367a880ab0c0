//! Arithmetic expression evaluator
//!
//! Numbers, `+ - * /`, unary `+`/`-`, and parentheses. Nothing else is
//! accepted: no names, no calls, no other operators.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' expr ')'
//! ```

use thiserror::Error;

/// Nesting limit for parentheses and unary operators
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("expression nested too deeply")]
    TooDeep,

    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(self) -> String {
        match self {
            Token::Number(n) => format!("number {n}"),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::Slash => "'/'".into(),
            Token::LParen => "'('".into(),
            Token::RParen => "')'".into(),
        }
    }
}

/// Evaluate `input` to a number.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some((token, pos)) => Err(EvalError::UnexpectedToken {
            found: token.describe(),
            pos,
        }),
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let literal = number_literal(input, pos);
                for _ in 0..literal.chars().count() {
                    chars.next();
                }
                let value: f64 = literal
                    .parse()
                    .map_err(|_| EvalError::InvalidNumber(literal.to_string()))?;
                tokens.push((Token::Number(value), pos));
                continue;
            }
            c => return Err(EvalError::UnexpectedChar { ch: c, pos }),
        };
        chars.next();
        tokens.push((token, pos));
    }

    Ok(tokens)
}

/// Longest run of `digits [. digits] [e [+-] digits]` starting at `start`.
fn number_literal(input: &str, start: usize) -> &str {
    let bytes = input.as_bytes();
    let mut end = start;
    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    end = digits(end);
    if end < bytes.len() && bytes[end] == b'.' {
        end = digits(end + 1);
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &input[start..end]
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

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.peek();
        self.pos += 1;
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
            } else if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            } else {
                value / rhs
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some((Token::Plus, _)) => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            Some((Token::Minus, _)) => {
                self.pos += 1;
                self.nested(Self::unary).map(|v| -v)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.next() {
            Some((Token::Number(n), _)) => Ok(n),
            Some((Token::LParen, _)) => {
                let value = self.nested(Self::expr)?;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((token, pos)) => Err(EvalError::UnexpectedToken {
                        found: token.describe(),
                        pos,
                    }),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some((token, pos)) => Err(EvalError::UnexpectedToken {
                found: token.describe(),
                pos,
            }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<f64, EvalError>,
    ) -> Result<f64, EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        let value = rule(self);
        self.depth -= 1;
        value
    }
}
