use crate::ReferenceKey;
use itertools::Itertools;
use query_syntax::ReferenceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index fields a resolved reference is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexField {
    Categories,
    Feed,
    Search,
    Tags,
    /// The uploader.
    User,
    Authors,
    Playlists,
}

impl IndexField {
    /// The field a kind's key is matched against. Users are also matched
    /// against [`IndexField::Authors`] by the compiler.
    pub fn for_kind(kind: ReferenceKind) -> Self {
        match kind {
            ReferenceKind::Category => IndexField::Categories,
            ReferenceKind::Feed => IndexField::Feed,
            ReferenceKind::SavedSearch => IndexField::Search,
            ReferenceKind::Tag => IndexField::Tags,
            ReferenceKind::User => IndexField::User,
            ReferenceKind::Playlist => IndexField::Playlists,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IndexField::Categories => "categories",
            IndexField::Feed => "feed",
            IndexField::Search => "search",
            IndexField::Tags => "tags",
            IndexField::User => "user",
            IndexField::Authors => "authors",
            IndexField::Playlists => "playlists",
        }
    }
}

impl fmt::Display for IndexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean filter handed to the search backend.
///
/// `And`/`Or` keep flat operand vectors; nested groups stay nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Full-text match against the default content.
    Content(String),
    FieldEquals {
        field: IndexField,
        key: ReferenceKey,
    },
    Or(Vec<Predicate>),
    And(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn content(text: impl Into<String>) -> Self {
        Predicate::Content(text.into())
    }

    pub fn field(field: IndexField, key: ReferenceKey) -> Self {
        Predicate::FieldEquals { field, key }
    }

    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// Disjunction of `parts`; `None` when empty, the lone operand when there
    /// is only one.
    pub fn any_of(mut parts: Vec<Predicate>) -> Option<Self> {
        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Predicate::Or(parts)),
        }
    }

    /// Conjunction of `parts`, collapsed like [`Predicate::any_of`].
    pub fn all_of(mut parts: Vec<Predicate>) -> Option<Self> {
        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Predicate::And(parts)),
        }
    }
}

impl Predicate {
    // Moves the direct operands into `out`, leaving `self` childless.
    fn take_operands(&mut self, out: &mut Vec<Predicate>) {
        match self {
            Predicate::Or(parts) | Predicate::And(parts) => out.append(parts),
            Predicate::Not(inner) => {
                out.push(std::mem::replace(&mut **inner, Predicate::Or(Vec::new())))
            }
            Predicate::Content(_) | Predicate::FieldEquals { .. } => {}
        }
    }
}

impl Drop for Predicate {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_operands(&mut pending);
        while let Some(mut predicate) = pending.pop() {
            predicate.take_operands(&mut pending);
        }
    }
}

#[derive(Clone, Copy)]
enum Piece<'p> {
    Node(&'p Predicate),
    Text(&'static str),
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };
            let (parts, separator) = match node {
                Predicate::Content(text) => {
                    write!(f, "content={text:?}")?;
                    continue;
                }
                Predicate::FieldEquals { field, key } => {
                    write!(f, "{field}={key}")?;
                    continue;
                }
                Predicate::Not(inner) => {
                    f.write_str("NOT ")?;
                    pieces.push(Piece::Node(&**inner));
                    continue;
                }
                Predicate::Or(parts) => (parts, Piece::Text(" OR ")),
                Predicate::And(parts) => (parts, Piece::Text(" AND ")),
            };
            // pushed back to front, popped front to back
            f.write_str("(")?;
            pieces.push(Piece::Text(")"));
            pieces.extend(Itertools::intersperse(
                parts.iter().rev().map(Piece::Node),
                separator,
            ));
        }
        Ok(())
    }
}
