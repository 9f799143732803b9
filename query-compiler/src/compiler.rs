use crate::{IndexField, Predicate, ReferenceKey, ReferenceStore, Resolver};
use anyhow::Result;
use query_syntax::{ReferenceKind, Term, parse_terms, split_reference};
use tracing::debug;

/// Turns terms into a single [`Predicate`], resolving typed keywords through
/// a [`Resolver`].
#[derive(Debug, Clone)]
pub struct Compiler<S> {
    resolver: Resolver<S>,
}

impl<S: ReferenceStore> Compiler<S> {
    pub fn new(resolver: Resolver<S>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    /// Parses and compiles a raw search-box string.
    pub fn compile_str(&self, input: &str) -> Result<Option<Predicate>> {
        self.compile(parse_terms(input))
    }

    /// ANDs together every term that compiles to something. `None` means no
    /// filtering should happen at all.
    pub fn compile<I>(&self, terms: I) -> Result<Option<Predicate>>
    where
        I: IntoIterator<Item = Term>,
    {
        let mut parts = Vec::new();
        for term in terms {
            if let Some(predicate) = self.compile_term(&term)? {
                parts.push(predicate);
            }
        }
        Ok(Predicate::all_of(parts))
    }

    /// Compiles one term. Groups are walked with an explicit stack of open
    /// groups, each holding its remaining members and the alternatives
    /// compiled so far.
    pub fn compile_term(&self, term: &Term) -> Result<Option<Predicate>> {
        let members = match term {
            Term::Literal { text, negated } => return self.compile_literal(text, *negated),
            Term::Group(members) => members,
        };
        let mut open = vec![(members.iter(), Vec::new())];
        while let Some((remaining, alternatives)) = open.last_mut() {
            match remaining.next() {
                Some(Term::Literal { text, negated }) => {
                    if let Some(predicate) = self.compile_literal(text, *negated)? {
                        alternatives.push(predicate);
                    }
                }
                Some(Term::Group(members)) => open.push((members.iter(), Vec::new())),
                None => {
                    let Some((_, alternatives)) = open.pop() else {
                        break;
                    };
                    if alternatives.is_empty() {
                        debug!("Dropping group without surviving members");
                    }
                    let group = Predicate::any_of(alternatives);
                    match open.last_mut() {
                        Some((_, parent)) => parent.extend(group),
                        None => return Ok(group),
                    }
                }
            }
        }
        Ok(None)
    }

    fn compile_literal(&self, text: &str, negated: bool) -> Result<Option<Predicate>> {
        if text.is_empty() {
            return Ok(None);
        }
        // unknown keywords search for the whole `keyword:value` text
        let predicate = match split_reference(text) {
            None => Predicate::content(text),
            Some((kind, value)) => match self.resolver.resolve(kind, value)? {
                Some(key) => reference_predicate(kind, key),
                None => {
                    // an unresolved reference stays dropped, negated or not
                    debug!("Dropping unresolved {kind}: {value:?}");
                    return Ok(None);
                }
            },
        };
        Ok(Some(if negated { predicate.negate() } else { predicate }))
    }
}

/// Predicate matching content that refers to `key`. A user matches both the
/// content they uploaded and the content they authored.
pub fn reference_predicate(kind: ReferenceKind, key: ReferenceKey) -> Predicate {
    match kind {
        ReferenceKind::User => Predicate::Or(vec![
            Predicate::field(IndexField::User, key),
            Predicate::field(IndexField::Authors, key),
        ]),
        _ => Predicate::field(IndexField::for_kind(kind), key),
    }
}
