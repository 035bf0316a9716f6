//! Cucumber-style tag expressions.
//!
//! Grammar: tags (`@name`), case-insensitive `not`, `and` and `or`, and
//! parentheses. `not` binds tighter than `and`, which binds tighter than
//! `or`; binary operators associate to the left. Input is tokenised up front
//! and then parsed by precedence climbing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::TagSet;

/// A tag expression that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tag expression at byte {offset}: {reason}")]
pub struct TagExprError {
    /// Byte offset of the offending input.
    pub offset: usize,
    /// What went wrong.
    pub reason: String,
}

impl TagExprError {
    fn at(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }
}

/// A parsed tag expression.
///
/// # Examples
///
/// ```
/// use bdd_splitter::tags::{TagExpression, TagSet};
///
/// let expr: TagExpression = "@smoke and not @wip".parse().unwrap_or_else(|e| panic!("{e}"));
/// assert!(expr.matches(&TagSet::from_iter(["@smoke"])));
/// assert!(!expr.matches(&TagSet::from_iter(["@smoke", "@wip"])));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagExpression {
    source: String,
    root: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, tags: &TagSet) -> bool {
        match self {
            Self::Tag(tag) => tags.contains(tag),
            Self::Not(inner) => !inner.eval(tags),
            Self::And(lhs, rhs) => lhs.eval(tags) && rhs.eval(tags),
            Self::Or(lhs, rhs) => lhs.eval(tags) || rhs.eval(tags),
        }
    }
}

impl TagExpression {
    /// Parse `input`.
    ///
    /// # Errors
    ///
    /// Returns [`TagExprError`] with the byte offset of the first problem.
    pub fn parse(input: &str) -> Result<Self, TagExprError> {
        let lexemes = tokenize(input)?;
        let mut parser = Parser {
            lexemes: &lexemes,
            pos: 0,
            end: input.len(),
        };
        let root = parser.expression(0)?;
        if let Some(extra) = parser.peek() {
            return Err(TagExprError::at(
                extra.offset,
                format!("unexpected {}", extra.token.describe()),
            ));
        }
        Ok(Self {
            source: input.trim().to_string(),
            root,
        })
    }

    /// Evaluate the expression against `tags`.
    #[must_use]
    pub fn matches(&self, tags: &TagSet) -> bool {
        self.root.eval(tags)
    }
}

impl FromStr for TagExpression {
    type Err = TagExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Tag(String),
    And,
    Or,
    Not,
    Open,
    Close,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Tag(tag) => format!("tag {tag}"),
            Self::And => "'and'".into(),
            Self::Or => "'or'".into(),
            Self::Not => "'not'".into(),
            Self::Open => "'('".into(),
            Self::Close => "')'".into(),
        }
    }

    /// Binding power of binary operators.
    fn precedence(&self) -> Option<u8> {
        match self {
            Self::Or => Some(1),
            Self::And => Some(2),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Lexeme {
    token: Token,
    offset: usize,
}

fn is_tag_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '(' | ')')
}

fn tokenize(input: &str) -> Result<Vec<Lexeme>, TagExprError> {
    let mut lexemes = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '(' => Token::Open,
            ')' => Token::Close,
            '@' => {
                let mut tag = String::from('@');
                while let Some((_, next)) = chars.next_if(|(_, c)| is_tag_char(*c)) {
                    tag.push(next);
                }
                if tag.len() == 1 {
                    return Err(TagExprError::at(offset + 1, "expected tag name after '@'"));
                }
                Token::Tag(tag)
            }
            c if c.is_alphabetic() => {
                let mut word = String::from(c);
                while let Some((_, next)) = chars.next_if(|(_, c)| c.is_alphanumeric()) {
                    word.push(next);
                }
                match word.to_lowercase().as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => {
                        return Err(TagExprError::at(
                            offset,
                            format!("unexpected identifier '{word}'; tags start with '@'"),
                        ));
                    }
                }
            }
            other => {
                return Err(TagExprError::at(
                    offset,
                    format!("unexpected character '{other}'"),
                ));
            }
        };
        lexemes.push(Lexeme { token, offset });
    }
    Ok(lexemes)
}

struct Parser<'t> {
    lexemes: &'t [Lexeme],
    pos: usize,
    end: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Lexeme> {
        let lexeme = self.lexemes.get(self.pos);
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    fn expression(&mut self, min_precedence: u8) -> Result<Expr, TagExprError> {
        let mut lhs = self.operand()?;
        while let Some(precedence) = self
            .peek()
            .and_then(|lexeme| lexeme.token.precedence())
            .filter(|precedence| *precedence >= min_precedence)
        {
            let is_and = matches!(self.bump().map(|l| &l.token), Some(Token::And));
            let rhs = self.expression(precedence + 1)?;
            lhs = if is_and {
                Expr::And(Box::new(lhs), Box::new(rhs))
            } else {
                Expr::Or(Box::new(lhs), Box::new(rhs))
            };
        }
        Ok(lhs)
    }

    fn operand(&mut self) -> Result<Expr, TagExprError> {
        let Some(lexeme) = self.bump() else {
            return Err(TagExprError::at(self.end, "expected tag, 'not' or '('"));
        };
        let offset = lexeme.offset;
        match &lexeme.token {
            Token::Tag(tag) => Ok(Expr::Tag(tag.clone())),
            Token::Not => Ok(Expr::Not(Box::new(self.operand()?))),
            Token::Open => {
                let inner = self.expression(0)?;
                match self.bump() {
                    Some(Lexeme {
                        token: Token::Close,
                        ..
                    }) => Ok(inner),
                    _ => Err(TagExprError::at(offset, "unclosed '('")),
                }
            }
            other => Err(TagExprError::at(
                offset,
                format!("expected tag, 'not' or '(' but found {}", other.describe()),
            )),
        }
    }
}
