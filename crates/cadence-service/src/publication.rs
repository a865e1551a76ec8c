use std::sync::Arc;

use cadence_store::{MediaStore, PostStore, PublicationStore, Store};
use cadence_types::{
    Clock, MediaId, PostId, Publication, PublicationDraft, PublicationFilter, PublicationId,
    PublicationPatch, PublicationStatus, Timestamp, Validate,
};

use crate::error::{ServiceError, ServiceResult};

/// Publication rules.
///
/// - Both the media and the post must exist, on create and on update.
/// - Once the stored date has elapsed the publication is published and can no
///   longer be updated. Deletion is always allowed.
///
/// This service is the only place that looks across all three tables; the
/// media and post services only see publications through reference counts.
#[derive(Clone)]
pub struct PublicationService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
}

impl PublicationService {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn create(&self, draft: PublicationDraft) -> ServiceResult<Publication> {
        draft.validate()?;
        self.require_media(draft.media_id)?;
        self.require_post(draft.post_id)?;

        let publication = self.store.insert_publication(&draft)?;
        tracing::info!(
            id = %publication.id,
            media = %publication.media_id,
            post = %publication.post_id,
            date = %publication.date,
            "publication scheduled"
        );
        Ok(publication)
    }

    /// List publications. `published` and `after` are the raw query
    /// parameters; see [`PublicationFilter::from_params`] for how they combine.
    pub fn find_all(
        &self,
        published: Option<bool>,
        after: Option<Timestamp>,
    ) -> ServiceResult<Vec<Publication>> {
        let filter = PublicationFilter::from_params(published, after);
        tracing::debug!(?filter, "listing publications");
        Ok(self.store.list_publications(filter, self.now())?)
    }

    pub fn find_one(&self, id: PublicationId) -> ServiceResult<Publication> {
        self.store
            .find_publication(id)?
            .ok_or_else(|| ServiceError::not_found("Publication not found"))
    }

    pub fn status(&self, id: PublicationId) -> ServiceResult<PublicationStatus> {
        Ok(self.find_one(id)?.status(self.now()))
    }

    /// Apply a partial update.
    ///
    /// The published guard compares the clock with the date currently
    /// stored, not with `patch.date`: a scheduled publication may be moved
    /// into the past, after which it is frozen.
    pub fn update(&self, id: PublicationId, patch: PublicationPatch) -> ServiceResult<Publication> {
        patch.validate()?;
        let existing = self.find_one(id)?;

        if let Some(media_id) = patch.media_id {
            self.require_media(media_id)?;
        }
        if let Some(post_id) = patch.post_id {
            self.require_post(post_id)?;
        }

        let now = self.now();
        if existing.is_published(now) {
            tracing::debug!(%id, date = %existing.date, %now, "update of published publication refused");
            return Err(ServiceError::forbidden("Publication has already been published"));
        }

        let updated = self.store.update_publication(id, &patch)?;
        tracing::info!(%id, date = %updated.date, "publication updated");
        Ok(updated)
    }

    pub fn delete(&self, id: PublicationId) -> ServiceResult<()> {
        self.find_one(id)?;
        self.store.delete_publication(id)?;
        tracing::info!(%id, "publication deleted");
        Ok(())
    }

    fn require_media(&self, id: MediaId) -> ServiceResult<()> {
        match self.store.find_media(id)? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("Media not found")),
        }
    }

    fn require_post(&self, id: PostId) -> ServiceResult<()> {
        match self.store.find_post(id)? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("Post not found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use cadence_store::InMemoryStore;
    use cadence_types::{ManualClock, Media, MediaDraft, Post, PostDraft};
    use chrono::{Duration, TimeZone, Utc};

    struct Fixture {
        store: Arc<InMemoryStore>,
        clock: Arc<ManualClock>,
        svc: PublicationService,
        media: Media,
        post: Post,
    }

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2030, 3, 15, 9, 0, 0).unwrap()
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(ManualClock::new(start()));
        let svc = PublicationService::new(store.clone(), clock.clone());
        let media = store
            .insert_media(&MediaDraft::new("Instagram", "cadence").unwrap())
            .unwrap();
        let post = store
            .insert_post(&PostDraft::new("Launch", "We are live.", None).unwrap())
            .unwrap();
        Fixture {
            store,
            clock,
            svc,
            media,
            post,
        }
    }

    impl Fixture {
        fn schedule(&self, offset: Duration) -> Publication {
            self.svc
                .create(PublicationDraft::new(self.media.id, self.post.id, start() + offset))
                .unwrap()
        }

        fn reason(err: ServiceError) -> String {
            err.to_string()
        }
    }

    // -----------------------------------------------------------------------
    // create
    // -----------------------------------------------------------------------

    #[test]
    fn create_with_existing_references() {
        let f = fixture();
        let p = f.schedule(Duration::days(1));
        assert_eq!(f.svc.find_one(p.id).unwrap(), p);
    }

    #[test]
    fn create_with_unknown_media_writes_nothing() {
        let f = fixture();
        let err = f
            .svc
            .create(PublicationDraft::new(MediaId::new(99), f.post.id, start()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(Fixture::reason(err), "Media not found");
        assert!(f.svc.find_all(None, None).unwrap().is_empty());
    }

    #[test]
    fn create_with_unknown_post() {
        let f = fixture();
        let err = f
            .svc
            .create(PublicationDraft::new(f.media.id, PostId::new(99), start()))
            .unwrap_err();
        assert_eq!(Fixture::reason(err), "Post not found");
        assert_eq!(f.store.row_counts().unwrap().2, 0);
    }

    #[test]
    fn media_is_checked_before_post() {
        let f = fixture();
        let err = f
            .svc
            .create(PublicationDraft::new(MediaId::new(98), PostId::new(99), start()))
            .unwrap_err();
        assert_eq!(Fixture::reason(err), "Media not found");
    }

    #[test]
    fn same_pair_can_be_scheduled_twice() {
        let f = fixture();
        let a = f.schedule(Duration::hours(1));
        let b = f.schedule(Duration::hours(1));
        assert_ne!(a.id, b.id);
    }

    // -----------------------------------------------------------------------
    // find_all
    // -----------------------------------------------------------------------

    #[test]
    fn find_all_filters() {
        let f = fixture();
        let past = f.schedule(-Duration::days(2));
        let soon = f.schedule(Duration::hours(1));
        let later = f.schedule(Duration::days(10));

        assert_eq!(f.svc.find_all(None, None).unwrap().len(), 3);
        assert_eq!(f.svc.find_all(Some(true), None).unwrap(), vec![past.clone()]);
        assert_eq!(
            f.svc.find_all(Some(false), None).unwrap(),
            vec![soon.clone(), later.clone()]
        );
        assert_eq!(
            f.svc.find_all(Some(false), Some(start() + Duration::days(1))).unwrap(),
            vec![later.clone()]
        );
        assert_eq!(
            f.svc.find_all(Some(true), Some(start() + Duration::days(1))).unwrap(),
            vec![past]
        );
    }

    #[test]
    fn find_all_tracks_the_clock() {
        let f = fixture();
        f.schedule(Duration::hours(1));
        assert!(f.svc.find_all(Some(true), None).unwrap().is_empty());

        f.clock.advance(Duration::hours(2));
        assert_eq!(f.svc.find_all(Some(true), None).unwrap().len(), 1);
        assert!(f.svc.find_all(Some(false), None).unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // update
    // -----------------------------------------------------------------------

    #[test]
    fn update_scheduled_publication() {
        let f = fixture();
        let p = f.schedule(Duration::days(1));
        let other_media = f
            .store
            .insert_media(&MediaDraft::new("Facebook", "cadence").unwrap())
            .unwrap();
        let patch = PublicationPatch {
            media_id: Some(other_media.id),
            post_id: Some(f.post.id),
            date: Some(start() + Duration::days(3)),
        };
        let updated = f.svc.update(p.id, patch).unwrap();
        assert_eq!(updated.media_id, other_media.id);
        assert_eq!(updated.date, start() + Duration::days(3));
    }

    #[test]
    fn update_published_publication_is_forbidden_whatever_the_fields() {
        let f = fixture();
        let p = f.schedule(-Duration::minutes(5));

        for patch in [
            PublicationPatch::default(),
            PublicationPatch {
                date: Some(start() + Duration::days(1)),
                ..Default::default()
            },
            PublicationPatch {
                post_id: Some(f.post.id),
                ..Default::default()
            },
        ] {
            let err = f.svc.update(p.id, patch).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Forbidden);
        }
        assert_eq!(f.svc.find_one(p.id).unwrap(), p);
    }

    #[test]
    fn guard_uses_stored_date_not_incoming_one() {
        let f = fixture();
        let p = f.schedule(Duration::hours(1));

        // Rescheduling into the past is accepted while the stored date is ahead.
        let moved = f
            .svc
            .update(
                p.id,
                PublicationPatch {
                    date: Some(start() - Duration::days(1)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(moved.status(f.svc.now()), PublicationStatus::Published);

        // From now on the publication is frozen.
        let err = f
            .svc
            .update(
                p.id,
                PublicationPatch {
                    date: Some(start() + Duration::days(1)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn update_is_refused_once_time_passes() {
        let f = fixture();
        let p = f.schedule(Duration::hours(1));
        f.svc.update(p.id, PublicationPatch::default()).unwrap();

        f.clock.advance(Duration::hours(1) + Duration::seconds(1));
        let err = f.svc.update(p.id, PublicationPatch::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn update_checks_run_in_order() {
        let f = fixture();
        let missing = f
            .svc
            .update(PublicationId::new(42), PublicationPatch::default())
            .unwrap_err();
        assert_eq!(Fixture::reason(missing), "Publication not found");

        // Reference checks come before the published guard.
        let p = f.schedule(-Duration::days(1));
        let bad_media = PublicationPatch {
            media_id: Some(MediaId::new(77)),
            ..Default::default()
        };
        assert_eq!(Fixture::reason(f.svc.update(p.id, bad_media).unwrap_err()), "Media not found");

        let bad_post = PublicationPatch {
            post_id: Some(PostId::new(77)),
            ..Default::default()
        };
        assert_eq!(Fixture::reason(f.svc.update(p.id, bad_post).unwrap_err()), "Post not found");
    }

    // -----------------------------------------------------------------------
    // delete / status
    // -----------------------------------------------------------------------

    #[test]
    fn delete_ignores_published_state() {
        let f = fixture();
        let past = f.schedule(-Duration::days(1));
        let future = f.schedule(Duration::days(1));
        f.svc.delete(past.id).unwrap();
        f.svc.delete(future.id).unwrap();
        assert!(f.svc.find_all(None, None).unwrap().is_empty());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let f = fixture();
        let err = f.svc.delete(PublicationId::new(5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn status_is_derived_on_each_call() {
        let f = fixture();
        let p = f.schedule(Duration::minutes(30));
        assert_eq!(f.svc.status(p.id).unwrap(), PublicationStatus::Scheduled);
        f.clock.set(start() + Duration::hours(1));
        assert_eq!(f.svc.status(p.id).unwrap(), PublicationStatus::Published);
    }
}
