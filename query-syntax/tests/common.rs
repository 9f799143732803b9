#![allow(dead_code)]
//! Shared helpers for `query-syntax` integration tests.

use query_syntax::*;

pub fn lex(input: &str) -> Vec<Token> {
    tokenize(input).collect()
}

pub fn terms(input: &str) -> Vec<Term> {
    parse_terms(input).collect()
}

pub fn as_group(term: &Term) -> &Vec<Term> {
    match term {
        Term::Group(members) => members,
        other => panic!("expected Group, got: {other:?}"),
    }
}

pub fn literal_is(term: &Term, expected: &str, negated: bool) {
    match term {
        Term::Literal { text, negated: n } => {
            assert_eq!(text, expected);
            assert_eq!(*n, negated, "negation of {expected:?}");
        }
        other => panic!("expected Literal, got: {other:?}"),
    }
}

pub fn word_texts(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Word(text) | Token::Phrase(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Depth of the deepest group in `term`, walked without recursion.
pub fn depth(term: &Term) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(term, 0)];
    while let Some((term, level)) = stack.pop() {
        deepest = deepest.max(level);
        if let Term::Group(members) = term {
            stack.extend(members.iter().map(|member| (member, level + 1)));
        }
    }
    deepest
}
