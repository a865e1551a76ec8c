use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use cadence_types::{
    Media, MediaDraft, MediaId, MediaPatch, Post, PostDraft, PostId, PostPatch, Publication,
    PublicationDraft, PublicationFilter, PublicationId, PublicationPatch, Timestamp,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::{MediaStore, PostStore, PublicationStore};

/// Rows keyed by id plus the next id to hand out.
///
/// Ids start at 1 and are never reused, even after deletion.
#[derive(Debug)]
struct Table<T> {
    name: &'static str,
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Clone> Table<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn update(&mut self, id: i64, apply: impl FnOnce(&mut T)) -> StoreResult<T> {
        let row = self.rows.get_mut(&id).ok_or(StoreError::NotFound {
            table: self.name,
            id,
        })?;
        apply(row);
        Ok(row.clone())
    }
}

/// In-memory, `BTreeMap`-based store.
///
/// Intended for tests, demos and single-process deployments. Each table sits
/// behind its own `RwLock`; data is lost when the store is dropped.
pub struct InMemoryStore {
    media: RwLock<Table<Media>>,
    posts: RwLock<Table<Post>>,
    publications: RwLock<Table<Publication>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            media: RwLock::new(Table::new("media")),
            posts: RwLock::new(Table::new("posts")),
            publications: RwLock::new(Table::new("publications")),
        }
    }

    /// Row counts as `(media, posts, publications)`.
    pub fn row_counts(&self) -> StoreResult<(usize, usize, usize)> {
        Ok((
            read(&self.media)?.rows.len(),
            read(&self.posts)?.rows.len(),
            read(&self.publications)?.rows.len(),
        ))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<Table<T>>) -> StoreResult<RwLockReadGuard<'_, Table<T>>> {
    lock.read().map_err(|e| StoreError::LockPoisoned {
        table: e.get_ref().name,
    })
}

fn write<T>(lock: &RwLock<Table<T>>) -> StoreResult<RwLockWriteGuard<'_, Table<T>>> {
    lock.write().map_err(|e| StoreError::LockPoisoned {
        table: e.get_ref().name,
    })
}

impl MediaStore for InMemoryStore {
    fn find_media(&self, id: MediaId) -> StoreResult<Option<Media>> {
        Ok(read(&self.media)?.get(id.get()))
    }

    fn list_media(&self) -> StoreResult<Vec<Media>> {
        Ok(read(&self.media)?.all())
    }

    fn find_media_by_pair(&self, title: &str, username: &str) -> StoreResult<Option<Media>> {
        let table = read(&self.media)?;
        Ok(table
            .rows
            .values()
            .find(|m| m.has_pair(title, username))
            .cloned())
    }

    fn insert_media(&self, draft: &MediaDraft) -> StoreResult<Media> {
        let mut table = write(&self.media)?;
        let id = table.allocate_id();
        let media = draft.clone().into_media(MediaId::new(id));
        table.rows.insert(id, media.clone());
        tracing::trace!(table = "media", id, "row inserted");
        Ok(media)
    }

    fn update_media(&self, id: MediaId, patch: &MediaPatch) -> StoreResult<Media> {
        write(&self.media)?.update(id.get(), |m| m.apply(patch))
    }

    fn delete_media(&self, id: MediaId) -> StoreResult<bool> {
        Ok(write(&self.media)?.rows.remove(&id.get()).is_some())
    }
}

impl PostStore for InMemoryStore {
    fn find_post(&self, id: PostId) -> StoreResult<Option<Post>> {
        Ok(read(&self.posts)?.get(id.get()))
    }

    fn list_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(read(&self.posts)?.all())
    }

    fn insert_post(&self, draft: &PostDraft) -> StoreResult<Post> {
        let mut table = write(&self.posts)?;
        let id = table.allocate_id();
        let post = draft.clone().into_post(PostId::new(id));
        table.rows.insert(id, post.clone());
        tracing::trace!(table = "posts", id, "row inserted");
        Ok(post)
    }

    fn update_post(&self, id: PostId, patch: &PostPatch) -> StoreResult<Post> {
        write(&self.posts)?.update(id.get(), |p| p.apply(patch))
    }

    fn delete_post(&self, id: PostId) -> StoreResult<bool> {
        Ok(write(&self.posts)?.rows.remove(&id.get()).is_some())
    }
}

impl PublicationStore for InMemoryStore {
    fn find_publication(&self, id: PublicationId) -> StoreResult<Option<Publication>> {
        Ok(read(&self.publications)?.get(id.get()))
    }

    fn list_publications(
        &self,
        filter: PublicationFilter,
        now: Timestamp,
    ) -> StoreResult<Vec<Publication>> {
        let table = read(&self.publications)?;
        Ok(table
            .rows
            .values()
            .filter(|p| filter.matches(p.date, now))
            .cloned()
            .collect())
    }

    fn insert_publication(&self, draft: &PublicationDraft) -> StoreResult<Publication> {
        let mut table = write(&self.publications)?;
        let id = table.allocate_id();
        let publication = draft.clone().into_publication(PublicationId::new(id));
        table.rows.insert(id, publication.clone());
        tracing::trace!(table = "publications", id, "row inserted");
        Ok(publication)
    }

    fn update_publication(
        &self,
        id: PublicationId,
        patch: &PublicationPatch,
    ) -> StoreResult<Publication> {
        write(&self.publications)?.update(id.get(), |p| p.apply(patch))
    }

    fn delete_publication(&self, id: PublicationId) -> StoreResult<bool> {
        Ok(write(&self.publications)?.rows.remove(&id.get()).is_some())
    }

    fn count_publications_by_media(&self, media_id: MediaId) -> StoreResult<usize> {
        let table = read(&self.publications)?;
        Ok(table.rows.values().filter(|p| p.media_id == media_id).count())
    }

    fn count_publications_by_post(&self, post_id: PostId) -> StoreResult<usize> {
        let table = read(&self.publications)?;
        Ok(table.rows.values().filter(|p| p.post_id == post_id).count())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("InMemoryStore");
        match self.row_counts() {
            Ok((media, posts, publications)) => s
                .field("media", &media)
                .field("posts", &posts)
                .field("publications", &publications),
            Err(_) => s.field("state", &"poisoned"),
        };
        s.finish()
    }
}
