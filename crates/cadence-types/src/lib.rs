//! Domain types for Cadence.
//!
//! This crate holds the records the rest of the workspace passes around and
//! the rules that can be checked without touching storage. Every other
//! Cadence crate depends on `cadence-types`.
//!
//! # Key Types
//!
//! - [`Media`]: a publishing channel, unique by `(title, username)`
//! - [`Post`]: a content item with an optional image URL
//! - [`Publication`]: a post scheduled on a media at a date
//! - [`PublicationStatus`]: scheduled or published, derived from a [`Clock`]
//! - [`PublicationFilter`]: row selection for publication listings
//!
//! Drafts (`*Draft`) carry the fields needed to create a record, patches
//! (`*Patch`) carry partial updates. Both implement [`Validate`].

pub mod error;
pub mod ids;
pub mod media;
pub mod post;
pub mod publication;
pub mod temporal;
pub mod validation;

pub use error::TypeError;
pub use ids::{MediaId, PostId, PublicationId};
pub use media::{Media, MediaDraft, MediaPatch};
pub use post::{Post, PostDraft, PostPatch};
pub use publication::{
    parse_published_flag, Publication, PublicationDraft, PublicationFilter, PublicationPatch,
    PublicationStatus,
};
pub use temporal::{parse_timestamp, Clock, ManualClock, SystemClock, Timestamp};
pub use validation::Validate;
