use anyhow::Result;
use query_syntax::ReferenceKind;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Primary key of a reference object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceKey(pub u64);

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Data partition (site) a reference object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub u64);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier fields a reference object can be probed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Slug,
    Username,
    QueryString,
    PrimaryKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Matching {
    Exact,
    CaseInsensitive,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProbeTarget {
    Field {
        field: Field,
        value: String,
        matching: Matching,
    },
    /// A playlist addressed by its owner's username and its slug.
    OwnerSlug { owner: String, slug: String },
}

/// A single point lookup against a [`ReferenceStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Probe {
    pub kind: ReferenceKind,
    pub target: ProbeTarget,
    /// When set, only objects of this tenant may match.
    pub tenant: Option<TenantId>,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            ProbeTarget::Field {
                field,
                value,
                matching,
            } => write!(f, "{} {field:?} {matching:?} {value:?}", self.kind)?,
            ProbeTarget::OwnerSlug { owner, slug } => {
                write!(f, "{} owner {owner:?} slug {slug:?}", self.kind)?
            }
        }
        if let Some(tenant) = self.tenant {
            write!(f, " (tenant {tenant})")?;
        }
        Ok(())
    }
}

/// Read-only lookup capability the resolver is written against.
///
/// Implementations return `Ok(None)` for identifiers that match nothing,
/// including malformed ones such as a non-numeric primary key. `Err` is
/// reserved for the backend itself failing.
pub trait ReferenceStore {
    fn lookup(&self, probe: &Probe) -> Result<Option<ReferenceKey>>;
}

impl<S: ReferenceStore + ?Sized> ReferenceStore for &S {
    fn lookup(&self, probe: &Probe) -> Result<Option<ReferenceKey>> {
        (**self).lookup(probe)
    }
}

impl<S: ReferenceStore + ?Sized> ReferenceStore for Box<S> {
    fn lookup(&self, probe: &Probe) -> Result<Option<ReferenceKey>> {
        (**self).lookup(probe)
    }
}

impl<S: ReferenceStore + ?Sized> ReferenceStore for Arc<S> {
    fn lookup(&self, probe: &Probe) -> Result<Option<ReferenceKey>> {
        (**self).lookup(probe)
    }
}
