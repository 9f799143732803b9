//! # Search-box query compiler
//!
//! Compiles the [`query_syntax::Term`] stream of a search-box string into a
//! single [`Predicate`]. Typed keywords such as `category:Funny` are resolved
//! to reference keys through a [`ReferenceStore`]; identifiers that do not
//! resolve are dropped instead of failing the search.
//!
//! ```
//! use query_compiler::{
//!     Compiler, IndexField, MemoryStore, Predicate, ReferenceKey, ReferenceRecord, Resolver,
//! };
//! use query_syntax::ReferenceKind;
//!
//! let store: MemoryStore = [ReferenceRecord::new(ReferenceKind::Category, 7).name("Funny")]
//!     .into_iter()
//!     .collect();
//! let compiler = Compiler::new(Resolver::new(store));
//! let predicate = compiler
//!     .compile_str("car -boring {cats dogs} category:Funny")
//!     .unwrap();
//! assert_eq!(
//!     predicate,
//!     Some(Predicate::And(vec![
//!         Predicate::content("car"),
//!         Predicate::content("boring").negate(),
//!         Predicate::Or(vec![Predicate::content("cats"), Predicate::content("dogs")]),
//!         Predicate::field(IndexField::Categories, ReferenceKey(7)),
//!     ]))
//! );
//! ```
mod cached;
mod catalog;
mod compiler;
mod facade;
mod fixture;
mod memory;
mod predicate;
mod resolver;
mod store;

pub use cached::CachedStore;
pub use catalog::{Document, SearchSet};
pub use compiler::{Compiler, reference_predicate};
pub use facade::Filterable;
pub use fixture::{Fixture, read_fixture_from_file, write_fixture_to_file};
pub use memory::{MemoryStore, ReferenceRecord};
pub use predicate::{IndexField, Predicate};
pub use resolver::{Resolver, is_tenant_scoped, probe_fields};
pub use store::{
    Field, Matching, Probe, ProbeTarget, ReferenceKey, ReferenceStore, TenantId,
};
