use crate::{Field, Matching, Probe, ProbeTarget, ReferenceKey, ReferenceStore, TenantId};
use anyhow::Result;
use hashbrown::HashMap;
use query_syntax::ReferenceKind;
use serde::{Deserialize, Serialize};

/// A reference object as seen by the resolver: its key, its tenant and the
/// identifier fields it can be found by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub kind: ReferenceKind,
    pub key: ReferenceKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string: Option<String>,
    /// Username of the owning user, for playlists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl ReferenceRecord {
    pub fn new(kind: ReferenceKind, key: u64) -> Self {
        Self {
            kind,
            key: ReferenceKey(key),
            tenant: None,
            name: None,
            slug: None,
            username: None,
            query_string: None,
            owner: None,
        }
    }

    pub fn tenant(mut self, tenant: u64) -> Self {
        self.tenant = Some(TenantId(tenant));
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = Some(query_string.into());
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Slug => self.slug.as_deref(),
            Field::Username => self.username.as_deref(),
            Field::QueryString => self.query_string.as_deref(),
            Field::PrimaryKey => None,
        }
    }
}

/// In-memory [`ReferenceStore`]. When several records match a probe the one
/// inserted first wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<ReferenceKind, Vec<ReferenceRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: ReferenceRecord) {
        self.records.entry(record.kind).or_default().push(record);
    }

    pub fn records(&self, kind: ReferenceKind) -> &[ReferenceRecord] {
        self.records.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<ReferenceRecord> for MemoryStore {
    fn from_iter<T: IntoIterator<Item = ReferenceRecord>>(iter: T) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<ReferenceRecord> for MemoryStore {
    fn extend<T: IntoIterator<Item = ReferenceRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl ReferenceStore for MemoryStore {
    fn lookup(&self, probe: &Probe) -> Result<Option<ReferenceKey>> {
        let mut candidates = self
            .records(probe.kind)
            .iter()
            .filter(|record| probe.tenant.is_none_or(|tenant| record.tenant == Some(tenant)));

        let found = match &probe.target {
            ProbeTarget::Field {
                field: Field::PrimaryKey,
                value,
                ..
            } => {
                let Ok(key) = value.parse::<u64>() else {
                    return Ok(None);
                };
                candidates.find(|record| record.key == ReferenceKey(key))
            }
            ProbeTarget::Field {
                field,
                value,
                matching: Matching::Exact,
            } => candidates.find(|record| record.field(*field) == Some(value.as_str())),
            ProbeTarget::Field {
                field,
                value,
                matching: Matching::CaseInsensitive,
            } => {
                let value = value.to_lowercase();
                candidates.find(|record| {
                    record
                        .field(*field)
                        .is_some_and(|candidate| candidate.to_lowercase() == value)
                })
            }
            ProbeTarget::OwnerSlug { owner, slug } => candidates.find(|record| {
                record.owner.as_deref() == Some(owner.as_str())
                    && record.slug.as_deref() == Some(slug.as_str())
            }),
        };
        Ok(found.map(|record| record.key))
    }
}
