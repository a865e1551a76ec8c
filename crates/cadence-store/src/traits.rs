use cadence_types::{
    Media, MediaDraft, MediaId, MediaPatch, Post, PostDraft, PostId, PostPatch, Publication,
    PublicationDraft, PublicationFilter, PublicationId, PublicationPatch, Timestamp,
};

use crate::error::StoreResult;

/// Persistence of [`Media`] rows.
///
/// Lookups return `Ok(None)` for a missing row; only the backend itself
/// failing produces an `Err`.
pub trait MediaStore: Send + Sync {
    fn find_media(&self, id: MediaId) -> StoreResult<Option<Media>>;

    /// All media, ordered by ascending id.
    fn list_media(&self) -> StoreResult<Vec<Media>>;

    /// The media carrying exactly this `(title, username)` pair, if any.
    fn find_media_by_pair(&self, title: &str, username: &str) -> StoreResult<Option<Media>>;

    /// Persist a draft and return the row with its assigned id.
    fn insert_media(&self, draft: &MediaDraft) -> StoreResult<Media>;

    /// Merge `patch` into an existing row. Fails with `NotFound` if absent.
    fn update_media(&self, id: MediaId, patch: &MediaPatch) -> StoreResult<Media>;

    /// Returns `true` if the row existed.
    fn delete_media(&self, id: MediaId) -> StoreResult<bool>;
}

/// Persistence of [`Post`] rows.
pub trait PostStore: Send + Sync {
    fn find_post(&self, id: PostId) -> StoreResult<Option<Post>>;

    /// All posts, ordered by ascending id.
    fn list_posts(&self) -> StoreResult<Vec<Post>>;

    fn insert_post(&self, draft: &PostDraft) -> StoreResult<Post>;

    /// Merge `patch` into an existing row. Fails with `NotFound` if absent.
    fn update_post(&self, id: PostId, patch: &PostPatch) -> StoreResult<Post>;

    fn delete_post(&self, id: PostId) -> StoreResult<bool>;
}

/// Persistence of [`Publication`] rows, plus the foreign-key counts the
/// media and post services use as deletion guards.
pub trait PublicationStore: Send + Sync {
    fn find_publication(&self, id: PublicationId) -> StoreResult<Option<Publication>>;

    /// Publications selected by `filter` at `now`, ordered by ascending id.
    fn list_publications(
        &self,
        filter: PublicationFilter,
        now: Timestamp,
    ) -> StoreResult<Vec<Publication>>;

    fn insert_publication(&self, draft: &PublicationDraft) -> StoreResult<Publication>;

    /// Merge `patch` into an existing row. Fails with `NotFound` if absent.
    fn update_publication(
        &self,
        id: PublicationId,
        patch: &PublicationPatch,
    ) -> StoreResult<Publication>;

    fn delete_publication(&self, id: PublicationId) -> StoreResult<bool>;

    /// Number of publications whose `media_id` equals `media_id`.
    fn count_publications_by_media(&self, media_id: MediaId) -> StoreResult<usize>;

    /// Number of publications whose `post_id` equals `post_id`.
    fn count_publications_by_post(&self, post_id: PostId) -> StoreResult<usize>;
}

/// A complete backend: all three tables behind one handle.
///
/// Implementations give per-row atomicity only. A check followed by a write
/// (existence, uniqueness, reference counts) is two separate calls and can
/// race with concurrent writers.
pub trait Store: MediaStore + PostStore + PublicationStore {}

impl<T> Store for T where T: MediaStore + PostStore + PublicationStore {}
