//! Storage adapter for Cadence.
//!
//! The domain services never talk to a database directly. They go through the
//! traits in this crate, which expose exactly the predicates the services
//! need: lookup by id, full listing, listing publications by date, lookup of
//! a media by its `(title, username)` pair, and counting publications that
//! reference a media or a post.
//!
//! # Backends
//!
//! All backends implement the [`Store`] trait (the union of [`MediaStore`],
//! [`PostStore`] and [`PublicationStore`]):
//!
//! - [`InMemoryStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. A missing row is `Ok(None)`, never an error.
//! 2. Updates of a missing row fail with [`StoreError::NotFound`].
//! 3. Ids are assigned by the store, per table, and never reused.
//! 4. Atomicity is per call. Multi-step checks in the services are not transactional.
//! 5. Backend failures are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use traits::{MediaStore, PostStore, PublicationStore, Store};
