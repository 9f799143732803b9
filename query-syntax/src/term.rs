use crate::{
    keyword::{ReferenceKind, split_reference},
    lexer::{Token, Tokens, tokenize},
};
use serde::Serialize;

/// A parsed unit of query meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// A word, phrase or `keyword:value` pair. Negation lives in the flag,
    /// never in the text.
    Literal { text: String, negated: bool },
    /// `{...}`: any member may match. Members can be groups themselves.
    Group(Vec<Term>),
}

impl Term {
    pub fn literal(text: impl Into<String>) -> Self {
        Term::Literal {
            text: text.into(),
            negated: false,
        }
    }

    pub fn negated(text: impl Into<String>) -> Self {
        Term::Literal {
            text: text.into(),
            negated: true,
        }
    }

    pub fn group(members: impl IntoIterator<Item = Term>) -> Self {
        Term::Group(members.into_iter().collect())
    }

    /// The typed reference this literal names, if any.
    pub fn reference(&self) -> Option<(ReferenceKind, &str)> {
        match self {
            Term::Literal { text, .. } => split_reference(text),
            Term::Group(_) => None,
        }
    }
}

// Groups are unlinked onto a worklist so deeply nested input does not
// recurse once per level on drop.
impl Drop for Term {
    fn drop(&mut self) {
        let Term::Group(members) = self else {
            return;
        };
        let mut pending = std::mem::take(members);
        while let Some(mut term) = pending.pop() {
            if let Term::Group(members) = &mut term {
                pending.append(members);
            }
        }
    }
}

/// Tokenizes `input` and assembles the tokens into terms.
pub fn parse_terms(input: &str) -> Terms<Tokens> {
    build_terms(tokenize(input))
}

/// Lazily assembles a token stream into top-level terms.
pub fn build_terms<I>(tokens: I) -> Terms<I::IntoIter>
where
    I: IntoIterator<Item = Token>,
{
    Terms {
        tokens: tokens.into_iter(),
        negated: false,
        groups: Vec::new(),
    }
}

/// Streaming term builder.
///
/// Nesting is tracked with an explicit stack of open groups rather than
/// recursion, so arbitrarily deep `{{{...` input only grows the heap. A
/// top-level term is yielded as soon as its closing boundary is reached.
///
/// Negation quirks:
/// - `-` inside an open group is ignored.
/// - `{` and `}` clear a pending `-`, so `-{a b}` is the plain group.
/// - a `}` without an open group is ignored.
#[derive(Debug, Clone)]
pub struct Terms<I> {
    tokens: I,
    negated: bool,
    groups: Vec<Vec<Term>>,
}

impl<I> Iterator for Terms<I>
where
    I: Iterator<Item = Token>,
{
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        while let Some(token) = self.tokens.next() {
            match token {
                Token::Negate => {
                    if self.groups.is_empty() {
                        self.negated = !self.negated;
                    }
                }
                Token::OpenGroup => {
                    self.negated = false;
                    self.groups.push(Vec::new());
                }
                Token::CloseGroup => {
                    self.negated = false;
                    let Some(members) = self.groups.pop() else {
                        continue;
                    };
                    let group = Term::Group(members);
                    match self.groups.last_mut() {
                        Some(parent) => parent.push(group),
                        None => return Some(group),
                    }
                }
                Token::Word(text) | Token::Phrase(text) => {
                    let literal = Term::Literal {
                        text,
                        negated: std::mem::take(&mut self.negated),
                    };
                    match self.groups.last_mut() {
                        Some(group) => group.push(literal),
                        None => return Some(literal),
                    }
                }
            }
        }
        // unbalanced `{`: innermost group first
        self.groups.pop().map(Term::Group)
    }
}
