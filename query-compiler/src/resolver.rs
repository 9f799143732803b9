use crate::{Field, Matching, Probe, ProbeTarget, ReferenceKey, ReferenceStore, TenantId};
use anyhow::{Context, Result};
use query_syntax::ReferenceKind;
use tracing::debug;

/// Identifier fields probed for each kind, in priority order. The primary key
/// always comes last.
pub fn probe_fields(kind: ReferenceKind) -> &'static [Field] {
    match kind {
        ReferenceKind::Category => &[Field::Name, Field::Slug, Field::PrimaryKey],
        ReferenceKind::Feed => &[Field::Name, Field::PrimaryKey],
        ReferenceKind::SavedSearch => &[Field::QueryString, Field::PrimaryKey],
        ReferenceKind::Tag => &[Field::Name, Field::PrimaryKey],
        ReferenceKind::User => &[Field::Username, Field::PrimaryKey],
        ReferenceKind::Playlist => &[Field::PrimaryKey],
    }
}

/// Kinds whose objects belong to a tenant. Users and tags are shared.
pub fn is_tenant_scoped(kind: ReferenceKind) -> bool {
    match kind {
        ReferenceKind::Category
        | ReferenceKind::Feed
        | ReferenceKind::SavedSearch
        | ReferenceKind::Playlist => true,
        ReferenceKind::Tag | ReferenceKind::User => false,
    }
}

/// Resolves `keyword:value` identifiers to reference keys.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    store: S,
    tenant: Option<TenantId>,
}

impl<S: ReferenceStore> Resolver<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            tenant: None,
        }
    }

    /// Restricts tenant-scoped kinds to `tenant`.
    pub fn with_tenant(mut self, tenant: impl Into<Option<TenantId>>) -> Self {
        self.tenant = tenant.into();
        self
    }

    pub fn tenant(&self) -> Option<TenantId> {
        self.tenant
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Probes every identifier field of `kind`, exact before case-insensitive,
    /// and returns the first hit. Playlists additionally accept `owner/slug`.
    ///
    /// Not finding anything is `Ok(None)`; only store failures are errors.
    pub fn resolve(&self, kind: ReferenceKind, identifier: &str) -> Result<Option<ReferenceKey>> {
        let tenant = if is_tenant_scoped(kind) {
            self.tenant
        } else {
            None
        };

        for &field in probe_fields(kind) {
            let matchings: &[Matching] = if field == Field::PrimaryKey {
                &[Matching::Exact]
            } else {
                &[Matching::Exact, Matching::CaseInsensitive]
            };
            for &matching in matchings {
                let probe = Probe {
                    kind,
                    target: ProbeTarget::Field {
                        field,
                        value: identifier.to_string(),
                        matching,
                    },
                    tenant,
                };
                if let Some(key) = self.lookup(&probe)? {
                    return Ok(Some(key));
                }
            }
        }

        if kind == ReferenceKind::Playlist {
            if let Some((owner, slug)) = split_owner_slug(identifier) {
                let probe = Probe {
                    kind,
                    target: ProbeTarget::OwnerSlug {
                        owner: owner.to_string(),
                        slug: slug.to_string(),
                    },
                    tenant,
                };
                return self.lookup(&probe);
            }
        }

        Ok(None)
    }

    fn lookup(&self, probe: &Probe) -> Result<Option<ReferenceKey>> {
        let found = self
            .store
            .lookup(probe)
            .with_context(|| format!("Failed to look up {probe}"))?;
        if let Some(key) = found {
            debug!("{probe} => {key}");
        }
        Ok(found)
    }
}

// `owner/slug` with exactly one separator.
fn split_owner_slug(identifier: &str) -> Option<(&str, &str)> {
    let (owner, slug) = identifier.split_once('/')?;
    (!slug.contains('/')).then_some((owner, slug))
}
