use crate::{Filterable, IndexField, Predicate, ReferenceKey};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A searchable item: free text plus the reference keys it is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub fields: HashMap<IndexField, Vec<ReferenceKey>>,
}

impl Document {
    pub fn new(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with(mut self, field: IndexField, key: u64) -> Self {
        self.fields.entry(field).or_default().push(ReferenceKey(key));
        self
    }

    pub fn has(&self, field: IndexField, key: ReferenceKey) -> bool {
        self.fields
            .get(&field)
            .is_some_and(|keys| keys.contains(&key))
    }
}

// A combination still waiting on some of its operands.
enum Pending<'p> {
    Any(std::slice::Iter<'p, Predicate>),
    All(std::slice::Iter<'p, Predicate>),
    Not,
}

impl Predicate {
    /// Evaluates the predicate against one document. Content matches are
    /// case-insensitive substring matches.
    ///
    /// `Or`/`And` short-circuit. Nesting is tracked on the heap, so any depth
    /// the compiler can produce is evaluated.
    pub fn matches(&self, document: &Document) -> bool {
        let mut pending = Vec::new();
        let mut current = self;
        loop {
            let mut value = loop {
                match current {
                    Predicate::Content(text) => {
                        break document
                            .content
                            .to_lowercase()
                            .contains(&text.to_lowercase());
                    }
                    Predicate::FieldEquals { field, key } => break document.has(*field, *key),
                    Predicate::Not(inner) => {
                        pending.push(Pending::Not);
                        current = &**inner;
                    }
                    Predicate::Or(parts) => {
                        let mut rest = parts.iter();
                        let Some(first) = rest.next() else {
                            break false;
                        };
                        pending.push(Pending::Any(rest));
                        current = first;
                    }
                    Predicate::And(parts) => {
                        let mut rest = parts.iter();
                        let Some(first) = rest.next() else {
                            break true;
                        };
                        pending.push(Pending::All(rest));
                        current = first;
                    }
                }
            };

            // settle finished combinations until one needs another operand
            loop {
                let next = match pending.last_mut() {
                    None => return value,
                    Some(Pending::Not) => {
                        value = !value;
                        None
                    }
                    Some(Pending::Any(rest)) if !value => rest.next(),
                    Some(Pending::All(rest)) if value => rest.next(),
                    Some(Pending::Any(_) | Pending::All(_)) => None,
                };
                match next {
                    Some(operand) => {
                        current = operand;
                        break;
                    }
                    None => {
                        pending.pop();
                    }
                }
            }
        }
    }
}

/// In-memory [`Filterable`]: a borrowed document list plus the filters
/// accumulated so far. Filtering returns a new set and evaluation is lazy.
/// Filters are shared between derived sets rather than copied.
#[derive(Debug, Clone)]
pub struct SearchSet<'a> {
    documents: &'a [Document],
    filters: Vec<Arc<Predicate>>,
}

impl<'a> SearchSet<'a> {
    pub fn new(documents: &'a [Document]) -> Self {
        Self {
            documents,
            filters: Vec::new(),
        }
    }

    /// Filters in the order they were applied.
    pub fn filters(&self) -> impl ExactSizeIterator<Item = &Predicate> + '_ {
        self.filters.iter().map(|filter| &**filter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Document> + '_ {
        self.documents
            .iter()
            .filter(|document| self.filters.iter().all(|filter| filter.matches(document)))
    }

    pub fn ids(&self) -> Vec<u64> {
        self.iter().map(|document| document.id).collect()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl Filterable for SearchSet<'_> {
    fn filter(&self, predicate: Predicate) -> Self {
        let mut next = self.clone();
        next.filters.push(Arc::new(predicate));
        next
    }
}
