//! Domain services for Cadence.
//!
//! Each service wraps one entity and enforces the rules that need the store:
//!
//! - [`MediaService`] -- `(title, username)` uniqueness, deletion guarded by
//!   publication references
//! - [`PostService`] -- plain CRUD, deletion guarded by publication references
//! - [`PublicationService`] -- media/post existence, published-date guard
//!
//! Services share one injected [`Store`](cadence_store::Store) handle. The
//! publication service also takes a [`Clock`]; "published" is always derived
//! from it, never stored.
//!
//! [`Services`] builds all three from a single store and clock.

pub mod error;
pub mod media;
pub mod post;
pub mod publication;

use std::sync::Arc;

use cadence_store::Store;
use cadence_types::Clock;

pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use media::MediaService;
pub use post::PostService;
pub use publication::PublicationService;

/// The three domain services wired to the same store.
#[derive(Clone)]
pub struct Services {
    pub media: MediaService,
    pub posts: PostService,
    pub publications: PublicationService,
}

impl Services {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self {
            media: MediaService::new(store.clone()),
            posts: PostService::new(store.clone()),
            publications: PublicationService::new(store, clock),
        }
    }
}
