#![allow(dead_code)]
//! Shared helpers for `query-compiler` integration tests.

use anyhow::{Result, bail};
use query_compiler::*;
use query_syntax::ReferenceKind;
use std::cell::RefCell;

pub fn store() -> MemoryStore {
    [
        ReferenceRecord::new(ReferenceKind::Category, 7).name("Funny").slug("funny").tenant(1),
        ReferenceRecord::new(ReferenceKind::Category, 8).name("news").slug("news").tenant(1),
        ReferenceRecord::new(ReferenceKind::Category, 9).name("Funny").slug("funny").tenant(2),
        ReferenceRecord::new(ReferenceKind::Feed, 11).name("Daily Show").tenant(1),
        ReferenceRecord::new(ReferenceKind::SavedSearch, 12).query_string("cats").tenant(1),
        ReferenceRecord::new(ReferenceKind::Tag, 3).name("cats"),
        ReferenceRecord::new(ReferenceKind::User, 2).username("ben"),
        ReferenceRecord::new(ReferenceKind::Playlist, 40).owner("ben").slug("mix").tenant(1),
    ]
    .into_iter()
    .collect()
}

pub fn compiler() -> Compiler<MemoryStore> {
    Compiler::new(Resolver::new(store()))
}

pub fn compile(input: &str) -> Option<Predicate> {
    compiler().compile_str(input).unwrap()
}

pub fn content(text: &str) -> Predicate {
    Predicate::content(text)
}

pub fn category(key: u64) -> Predicate {
    Predicate::field(IndexField::Categories, ReferenceKey(key))
}

/// Wraps a store and records every probe it sees.
pub struct Recording<S> {
    pub inner: S,
    pub probes: RefCell<Vec<Probe>>,
}

impl<S> Recording<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            probes: RefCell::new(Vec::new()),
        }
    }

    pub fn take(&self) -> Vec<Probe> {
        self.probes.take()
    }
}

impl<S: ReferenceStore> ReferenceStore for Recording<S> {
    fn lookup(&self, probe: &Probe) -> Result<Option<ReferenceKey>> {
        self.probes.borrow_mut().push(probe.clone());
        self.inner.lookup(probe)
    }
}

/// A store whose backend is always down.
pub struct Unavailable;

impl ReferenceStore for Unavailable {
    fn lookup(&self, _probe: &Probe) -> Result<Option<ReferenceKey>> {
        bail!("connection refused")
    }
}

pub fn target(field: Field, value: &str, matching: Matching) -> ProbeTarget {
    ProbeTarget::Field {
        field,
        value: value.to_string(),
        matching,
    }
}
