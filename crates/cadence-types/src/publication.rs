use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ids::{MediaId, PostId, PublicationId};
use crate::temporal::{iso_timestamp, Timestamp};
use crate::validation::Validate;

/// A post scheduled on a media at a given date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: PublicationId,
    pub media_id: MediaId,
    pub post_id: PostId,
    #[serde(with = "iso_timestamp")]
    pub date: Timestamp,
}

impl Publication {
    /// Derived state at `now`. Nothing is stored: the same publication moves
    /// from scheduled to published as time passes.
    pub fn status(&self, now: Timestamp) -> PublicationStatus {
        if now > self.date {
            PublicationStatus::Published
        } else {
            PublicationStatus::Scheduled
        }
    }

    pub fn is_published(&self, now: Timestamp) -> bool {
        self.status(now) == PublicationStatus::Published
    }

    /// Overwrite the fields supplied by `patch`.
    pub fn apply(&mut self, patch: &PublicationPatch) {
        if let Some(media_id) = patch.media_id {
            self.media_id = media_id;
        }
        if let Some(post_id) = patch.post_id {
            self.post_id = post_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

/// Time-derived state of a [`Publication`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    /// The date is now or in the future; the publication may still be edited.
    Scheduled,
    /// The date has elapsed; the publication is frozen.
    Published,
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Published => write!(f, "published"),
        }
    }
}

/// Fields required to create a [`Publication`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDraft {
    pub media_id: MediaId,
    pub post_id: PostId,
    #[serde(with = "iso_timestamp")]
    pub date: Timestamp,
}

impl PublicationDraft {
    pub fn new(media_id: MediaId, post_id: PostId, date: Timestamp) -> Self {
        Self {
            media_id,
            post_id,
            date,
        }
    }

    pub fn into_publication(self, id: PublicationId) -> Publication {
        Publication {
            id,
            media_id: self.media_id,
            post_id: self.post_id,
            date: self.date,
        }
    }
}

impl Validate for PublicationDraft {
    /// Field types are enforced by deserialization. Reference and date
    /// checks need the store and the clock, so they run in the service.
    fn validate(&self) -> Result<(), TypeError> {
        Ok(())
    }
}

/// Partial update of a [`Publication`]; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<MediaId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    #[serde(with = "iso_timestamp::option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
}

impl Validate for PublicationPatch {
    /// Field types are enforced by deserialization. Reference and date
    /// checks need the store and the clock, so they run in the service.
    fn validate(&self) -> Result<(), TypeError> {
        Ok(())
    }
}

/// Row selection for listing publications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublicationFilter {
    /// Every publication.
    All,
    /// `date < now`.
    Published,
    /// `date >= now`.
    Scheduled,
    /// `date >= after`.
    After(Timestamp),
}

impl PublicationFilter {
    /// Resolve the `published` / `after` query parameters.
    ///
    /// Exactly one predicate is honoured:
    ///
    /// | `published` | `after`  | filter          |
    /// |-------------|----------|-----------------|
    /// | `true`      | any      | `Published`     |
    /// | `false`     | `Some(t)`| `After(t)`      |
    /// | `false`     | `None`   | `Scheduled`     |
    /// | absent      | `Some(t)`| `After(t)`      |
    /// | absent      | `None`   | `All`           |
    pub fn from_params(published: Option<bool>, after: Option<Timestamp>) -> Self {
        match (published, after) {
            (Some(true), _) => Self::Published,
            (Some(false), Some(after)) | (None, Some(after)) => Self::After(after),
            (Some(false), None) => Self::Scheduled,
            (None, None) => Self::All,
        }
    }

    /// Whether a publication dated `date` is selected at `now`.
    pub fn matches(&self, date: Timestamp, now: Timestamp) -> bool {
        match self {
            Self::All => true,
            Self::Published => date < now,
            Self::Scheduled => date >= now,
            Self::After(after) => date >= *after,
        }
    }
}

/// Parse the textual `published` query parameter (`"true"` / `"false"`).
pub fn parse_published_flag(value: &str) -> Result<bool, TypeError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(TypeError::InvalidParam {
            param: "published",
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    fn publication_at(date: Timestamp) -> Publication {
        PublicationDraft::new(MediaId::new(1), PostId::new(2), date).into_publication(PublicationId::new(3))
    }

    #[test]
    fn status_follows_the_clock() {
        let p = publication_at(now());
        assert_eq!(p.status(now()), PublicationStatus::Scheduled);
        assert_eq!(p.status(now() + Duration::milliseconds(1)), PublicationStatus::Published);
        assert!(!p.is_published(now() - Duration::days(1)));
    }

    #[test]
    fn filter_resolution_table() {
        let t = now();
        assert_eq!(PublicationFilter::from_params(Some(true), None), PublicationFilter::Published);
        assert_eq!(PublicationFilter::from_params(Some(true), Some(t)), PublicationFilter::Published);
        assert_eq!(PublicationFilter::from_params(Some(false), None), PublicationFilter::Scheduled);
        assert_eq!(PublicationFilter::from_params(Some(false), Some(t)), PublicationFilter::After(t));
        assert_eq!(PublicationFilter::from_params(None, Some(t)), PublicationFilter::After(t));
        assert_eq!(PublicationFilter::from_params(None, None), PublicationFilter::All);
    }

    #[test]
    fn filter_boundaries() {
        let t = now();
        assert!(!PublicationFilter::Published.matches(t, t));
        assert!(PublicationFilter::Scheduled.matches(t, t));
        assert!(PublicationFilter::Published.matches(t - Duration::seconds(1), t));
        assert!(PublicationFilter::After(t).matches(t, t - Duration::days(30)));
        assert!(!PublicationFilter::After(t).matches(t - Duration::seconds(1), t));
        assert!(PublicationFilter::All.matches(t - Duration::days(365), t));
    }

    #[test]
    fn published_flag_parsing() {
        assert_eq!(parse_published_flag("true"), Ok(true));
        assert_eq!(parse_published_flag("false"), Ok(false));
        assert!(parse_published_flag("yes").is_err());
        assert!(parse_published_flag("TRUE").is_err());
    }

    #[test]
    fn apply_patch() {
        let mut p = publication_at(now());
        p.apply(&PublicationPatch {
            post_id: Some(PostId::new(8)),
            ..Default::default()
        });
        assert_eq!(p.media_id, MediaId::new(1));
        assert_eq!(p.post_id, PostId::new(8));
        assert_eq!(p.date, now());
    }

    #[test]
    fn json_shape_uses_camel_case() {
        let p = publication_at(now());
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["mediaId"], 1);
        assert_eq!(json["postId"], 2);
        assert_eq!(json["date"], "2030-06-01T12:00:00.000Z");
    }

    #[test]
    fn draft_accepts_iso_date_strings() {
        let draft: PublicationDraft =
            serde_json::from_str(r#"{"mediaId":1,"postId":2,"date":"2030-06-01"}"#).unwrap();
        assert_eq!(draft.date, Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn draft_rejects_wrong_types() {
        assert!(serde_json::from_str::<PublicationDraft>(r#"{"mediaId":"","postId":"","date":""}"#).is_err());
        assert!(serde_json::from_str::<PublicationDraft>(r#"{"mediaId":1,"postId":2,"date":"soon"}"#).is_err());
    }

    #[test]
    fn patch_date_is_optional() {
        let patch: PublicationPatch = serde_json::from_str(r#"{"mediaId":4}"#).unwrap();
        assert_eq!(patch.media_id, Some(MediaId::new(4)));
        assert!(patch.date.is_none());
    }
}
