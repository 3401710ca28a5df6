//! Boolean expression grammar.
//!
//! Expressions use the words `True`, `False`, `and`, `or`, `not` (matched
//! case-insensitively) and parentheses. Precedence is NOT > AND > OR, and
//! binary operators associate to the left:
//!
//! ```text
//! or_expr  := and_expr ("or" and_expr)*
//! and_expr := not_expr ("and" not_expr)*
//! not_expr := "not" not_expr | primary
//! primary  := "True" | "False" | "(" or_expr ")"
//! ```
//!
//! Nesting and tree height are capped at [`MAX_DEPTH`] so that parsing,
//! evaluation and rendering never recurse without bound.

use std::fmt;
use std::iter::Peekable;
use std::vec::IntoIter;

use thiserror::Error;

/// Maximum nesting of `not`/parentheses and maximum height of the parsed tree.
pub const MAX_DEPTH: usize = 256;

/// Errors produced while tokenizing or parsing an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("unrecognized token '{token}' at position {position}")]
    UnknownToken { token: String, position: usize },

    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: Token, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unclosed '(' opened at position {position}")]
    UnclosedParen { position: usize },

    #[error("expression nested too deeply at position {position} (limit {limit})")]
    TooDeep { position: usize, limit: usize },
}

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    True,
    False,
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::True => "True",
            Token::False => "False",
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "not",
            Token::LParen => "(",
            Token::RParen => ")",
        };
        f.write_str(text)
    }
}

/// A token together with its character offset in the source.
#[derive(Debug, Clone, Copy)]
struct Spanned {
    token: Token,
    position: usize,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(bool),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

/// Render a boolean the way expressions spell it.
pub fn bool_word(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn tokenize(input: &str) -> Result<Vec<Spanned>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().enumerate().peekable();

    while let Some((position, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_alphanumeric() || c == '_' => {
                let mut word = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !(next.is_alphanumeric() || next == '_') {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                match word.to_lowercase().as_str() {
                    "true" => Token::True,
                    "false" => Token::False,
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => {
                        return Err(ExprError::UnknownToken {
                            token: word,
                            position,
                        });
                    }
                }
            }
            other => {
                return Err(ExprError::UnknownToken {
                    token: other.to_string(),
                    position,
                });
            }
        };

        tokens.push(Spanned { token, position });
    }

    Ok(tokens)
}

/// Parse an expression into a tree.
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
        nesting: 0,
    };
    let (expr, _) = parser.or_expr()?;

    match parser.tokens.next() {
        None => Ok(expr),
        Some(extra) => Err(ExprError::UnexpectedToken {
            token: extra.token,
            position: extra.position,
        }),
    }
}

/// A parsed sub-expression with the height of its tree.
type Subtree = (Expr, usize);

/// Height of a node whose tallest child has `height`.
fn grow(height: usize, position: usize) -> Result<usize, ExprError> {
    let height = height + 1;
    if height > MAX_DEPTH {
        return Err(ExprError::TooDeep {
            position,
            limit: MAX_DEPTH,
        });
    }
    Ok(height)
}

struct Parser {
    tokens: Peekable<IntoIter<Spanned>>,
    /// Current `not`/parenthesis recursion depth.
    nesting: usize,
}

impl Parser {
    fn eat(&mut self, token: Token) -> Option<Spanned> {
        self.tokens.next_if(|s| s.token == token)
    }

    fn enter(&mut self, position: usize) -> Result<(), ExprError> {
        if self.nesting >= MAX_DEPTH {
            return Err(ExprError::TooDeep {
                position,
                limit: MAX_DEPTH,
            });
        }
        self.nesting += 1;
        Ok(())
    }

    fn or_expr(&mut self) -> Result<Subtree, ExprError> {
        let (mut lhs, mut height) = self.and_expr()?;
        while let Some(op) = self.eat(Token::Or) {
            let (rhs, rhs_height) = self.and_expr()?;
            height = grow(height.max(rhs_height), op.position)?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok((lhs, height))
    }

    fn and_expr(&mut self) -> Result<Subtree, ExprError> {
        let (mut lhs, mut height) = self.not_expr()?;
        while let Some(op) = self.eat(Token::And) {
            let (rhs, rhs_height) = self.not_expr()?;
            height = grow(height.max(rhs_height), op.position)?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok((lhs, height))
    }

    fn not_expr(&mut self) -> Result<Subtree, ExprError> {
        let Some(op) = self.eat(Token::Not) else {
            return self.primary();
        };

        self.enter(op.position)?;
        let (operand, height) = self.not_expr()?;
        self.nesting -= 1;
        Ok((Expr::Not(Box::new(operand)), grow(height, op.position)?))
    }

    fn primary(&mut self) -> Result<Subtree, ExprError> {
        let Some(spanned) = self.tokens.next() else {
            return Err(ExprError::UnexpectedEnd);
        };

        match spanned.token {
            Token::True => Ok((Expr::Literal(true), 0)),
            Token::False => Ok((Expr::Literal(false), 0)),
            Token::LParen => {
                self.enter(spanned.position)?;
                let inner = self.or_expr()?;
                self.nesting -= 1;
                if self.eat(Token::RParen).is_some() {
                    Ok(inner)
                } else {
                    match self.tokens.next() {
                        Some(other) => Err(ExprError::UnexpectedToken {
                            token: other.token,
                            position: other.position,
                        }),
                        None => Err(ExprError::UnclosedParen {
                            position: spanned.position,
                        }),
                    }
                }
            }
            token => Err(ExprError::UnexpectedToken {
                token,
                position: spanned.position,
            }),
        }
    }
}

impl Expr {
    /// Evaluate the tree, appending one line per reduction to `trace` in
    /// evaluation order (operands before their operator).
    pub fn evaluate(&self, trace: &mut Vec<String>) -> bool {
        match self {
            Expr::Literal(value) => *value,
            Expr::Not(inner) => {
                let value = inner.evaluate(trace);
                let result = !value;
                trace.push(format!("not {} = {}", bool_word(value), bool_word(result)));
                result
            }
            Expr::And(lhs, rhs) => {
                let l = lhs.evaluate(trace);
                let r = rhs.evaluate(trace);
                let result = l && r;
                trace.push(format!(
                    "{} and {} = {}",
                    bool_word(l),
                    bool_word(r),
                    bool_word(result)
                ));
                result
            }
            Expr::Or(lhs, rhs) => {
                let l = lhs.evaluate(trace);
                let r = rhs.evaluate(trace);
                let result = l || r;
                trace.push(format!(
                    "{} or {} = {}",
                    bool_word(l),
                    bool_word(r),
                    bool_word(result)
                ));
                result
            }
        }
    }

    fn write_grouped(&self, f: &mut fmt::Formatter<'_>, top: bool) -> fmt::Result {
        let grouped = !top && !matches!(self, Expr::Literal(_));
        if grouped {
            f.write_str("(")?;
        }
        match self {
            Expr::Literal(value) => f.write_str(bool_word(*value))?,
            Expr::Not(inner) => {
                f.write_str("not ")?;
                inner.write_grouped(f, false)?;
            }
            Expr::And(lhs, rhs) => {
                lhs.write_grouped(f, false)?;
                f.write_str(" and ")?;
                rhs.write_grouped(f, false)?;
            }
            Expr::Or(lhs, rhs) => {
                lhs.write_grouped(f, false)?;
                f.write_str(" or ")?;
                rhs.write_grouped(f, false)?;
            }
        }
        if grouped {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Fully parenthesized rendering: every sub-expression below the root that
/// is not a literal is wrapped in parentheses.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_grouped(f, true)
    }
}
