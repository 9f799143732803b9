use crate::{Probe, ReferenceKey, ReferenceStore};
use anyhow::Result;
use hashbrown::HashMap;
use parking_lot::Mutex;

/// Memoizes lookups of an underlying store.
///
/// The store is assumed not to change while the cache is alive. Failed
/// lookups are not remembered.
#[derive(Debug)]
pub struct CachedStore<S> {
    inner: S,
    memo: Mutex<HashMap<Probe, Option<ReferenceKey>>>,
}

impl<S> CachedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            memo: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_probes(&self) -> usize {
        self.memo.lock().len()
    }

    pub fn clear(&self) {
        self.memo.lock().clear();
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ReferenceStore> ReferenceStore for CachedStore<S> {
    fn lookup(&self, probe: &Probe) -> Result<Option<ReferenceKey>> {
        if let Some(hit) = self.memo.lock().get(probe) {
            return Ok(*hit);
        }
        // not holding the lock across the backend call
        let found = self.inner.lookup(probe)?;
        self.memo.lock().insert(probe.clone(), found);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, Matching, ProbeTarget};
    use anyhow::bail;
    use query_syntax::ReferenceKind;
    use std::cell::Cell;

    struct CountingStore {
        calls: Cell<usize>,
        fail: bool,
    }

    impl ReferenceStore for CountingStore {
        fn lookup(&self, probe: &Probe) -> Result<Option<ReferenceKey>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                bail!("backend unavailable");
            }
            Ok(match &probe.target {
                ProbeTarget::Field { value, .. } if value == "hit" => Some(ReferenceKey(1)),
                _ => None,
            })
        }
    }

    fn probe(value: &str) -> Probe {
        Probe {
            kind: ReferenceKind::Tag,
            target: ProbeTarget::Field {
                field: Field::Name,
                value: value.into(),
                matching: Matching::Exact,
            },
            tenant: None,
        }
    }

    #[test]
    fn repeats_are_served_from_memory() {
        let cached = CachedStore::new(CountingStore {
            calls: Cell::new(0),
            fail: false,
        });
        for _ in 0..3 {
            assert_eq!(cached.lookup(&probe("hit")).unwrap(), Some(ReferenceKey(1)));
            assert_eq!(cached.lookup(&probe("miss")).unwrap(), None);
        }
        assert_eq!(cached.cached_probes(), 2);
        assert_eq!(cached.into_inner().calls.get(), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let cached = CachedStore::new(CountingStore {
            calls: Cell::new(0),
            fail: true,
        });
        assert!(cached.lookup(&probe("hit")).is_err());
        assert!(cached.lookup(&probe("hit")).is_err());
        assert_eq!(cached.cached_probes(), 0);
        cached.clear();
        assert_eq!(cached.into_inner().calls.get(), 2);
    }
}
