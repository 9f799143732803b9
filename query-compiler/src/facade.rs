use crate::{Compiler, Predicate, ReferenceStore};
use anyhow::Result;
use tracing::debug;

/// A query object that can be narrowed by a [`Predicate`] without being
/// mutated.
pub trait Filterable: Clone {
    fn filter(&self, predicate: Predicate) -> Self;
}

impl<S: ReferenceStore> Compiler<S> {
    /// Best-effort search: compiles `input` and filters `queryable` with the
    /// result. When nothing survives compilation the queryable comes back
    /// unfiltered.
    ///
    /// Errors only come from the reference store; the shape of `input` never
    /// causes one.
    pub fn auto_query<Q: Filterable>(&self, queryable: &Q, input: &str) -> Result<Q> {
        match self.compile_str(input)? {
            Some(predicate) => {
                debug!("Filtering {input:?} with {predicate}");
                Ok(queryable.filter(predicate))
            }
            None => {
                debug!("Nothing to filter in {input:?}");
                Ok(queryable.clone())
            }
        }
    }
}
