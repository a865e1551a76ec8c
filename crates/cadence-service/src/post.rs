use std::sync::Arc;

use cadence_store::{PostStore, PublicationStore, Store};
use cadence_types::{Post, PostDraft, PostId, PostPatch, Validate};

use crate::error::{ServiceError, ServiceResult};

/// Post CRUD. Deletion is refused while a publication references the post.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: PostDraft) -> ServiceResult<Post> {
        draft.validate()?;
        let post = self.store.insert_post(&draft)?;
        tracing::info!(id = %post.id, "post created");
        Ok(post)
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Post>> {
        Ok(self.store.list_posts()?)
    }

    pub fn find_one(&self, id: PostId) -> ServiceResult<Post> {
        self.store
            .find_post(id)?
            .ok_or_else(|| ServiceError::not_found("Post not found"))
    }

    pub fn update(&self, id: PostId, patch: PostPatch) -> ServiceResult<Post> {
        patch.validate()?;
        self.find_one(id)?;
        let updated = self.store.update_post(id, &patch)?;
        tracing::info!(%id, "post updated");
        Ok(updated)
    }

    pub fn delete(&self, id: PostId) -> ServiceResult<()> {
        self.find_one(id)?;

        let references = self.store.count_publications_by_post(id)?;
        if references > 0 {
            tracing::debug!(%id, references, "post deletion blocked by publications");
            return Err(ServiceError::forbidden(format!(
                "Post is referenced by {references} publication(s)"
            )));
        }

        self.store.delete_post(id)?;
        tracing::info!(%id, "post deleted");
        Ok(())
    }
}
