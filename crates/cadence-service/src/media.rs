use std::sync::Arc;

use cadence_store::{MediaStore, PublicationStore, Store};
use cadence_types::{Media, MediaDraft, MediaId, MediaPatch, Validate};

use crate::error::{ServiceError, ServiceResult};

/// Media rules: `(title, username)` is unique, and a media still referenced
/// by a publication cannot be deleted.
#[derive(Clone)]
pub struct MediaService {
    store: Arc<dyn Store>,
}

impl MediaService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: MediaDraft) -> ServiceResult<Media> {
        draft.validate()?;
        if self
            .store
            .find_media_by_pair(&draft.title, &draft.username)?
            .is_some()
        {
            tracing::debug!(title = %draft.title, username = %draft.username, "duplicate media rejected");
            return Err(ServiceError::conflict("Media with this title and username already exists"));
        }

        let media = self.store.insert_media(&draft)?;
        tracing::info!(id = %media.id, "media created");
        Ok(media)
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Media>> {
        Ok(self.store.list_media()?)
    }

    pub fn find_one(&self, id: MediaId) -> ServiceResult<Media> {
        self.store
            .find_media(id)?
            .ok_or_else(|| ServiceError::not_found("Media not found"))
    }

    /// Apply a partial update. The uniqueness check runs against the pair the
    /// media would carry afterwards and ignores the media itself.
    pub fn update(&self, id: MediaId, patch: MediaPatch) -> ServiceResult<Media> {
        patch.validate()?;
        let current = self.find_one(id)?;

        let (title, username) = patch.merged_pair(&current);
        if let Some(other) = self.store.find_media_by_pair(title, username)? {
            if other.id != id {
                tracing::debug!(%id, other = %other.id, "media update would duplicate a pair");
                return Err(ServiceError::conflict(
                    "Media with this title and username already exists",
                ));
            }
        }

        let updated = self.store.update_media(id, &patch)?;
        tracing::info!(%id, "media updated");
        Ok(updated)
    }

    pub fn delete(&self, id: MediaId) -> ServiceResult<()> {
        self.find_one(id)?;

        let references = self.store.count_publications_by_media(id)?;
        if references > 0 {
            tracing::debug!(%id, references, "media deletion blocked by publications");
            return Err(ServiceError::forbidden(format!(
                "Media is referenced by {references} publication(s)"
            )));
        }

        self.store.delete_media(id)?;
        tracing::info!(%id, "media deleted");
        Ok(())
    }
}
