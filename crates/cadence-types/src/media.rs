use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ids::MediaId;
use crate::validation::{require_non_empty, Validate};

/// A publishing channel: an account (`username`) on a named network (`title`).
///
/// No two media share the same `(title, username)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: MediaId,
    pub title: String,
    pub username: String,
}

impl Media {
    /// Returns `true` if this media carries exactly the given pair.
    /// Comparison is case-sensitive.
    pub fn has_pair(&self, title: &str, username: &str) -> bool {
        self.title == title && self.username == username
    }

    /// Overwrite the fields supplied by `patch`.
    pub fn apply(&mut self, patch: &MediaPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(username) = &patch.username {
            self.username.clone_from(username);
        }
    }
}

/// Fields required to create a [`Media`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDraft {
    pub title: String,
    pub username: String,
}

impl MediaDraft {
    /// Build a draft, rejecting empty fields.
    pub fn new(title: impl Into<String>, username: impl Into<String>) -> Result<Self, TypeError> {
        let draft = Self {
            title: title.into(),
            username: username.into(),
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn into_media(self, id: MediaId) -> Media {
        Media {
            id,
            title: self.title,
            username: self.username,
        }
    }
}

impl Validate for MediaDraft {
    fn validate(&self) -> Result<(), TypeError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("username", &self.username)
    }
}

/// Partial update of a [`Media`]; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl MediaPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.username.is_none()
    }

    /// The `(title, username)` pair `current` would carry after this patch.
    pub fn merged_pair<'a>(&'a self, current: &'a Media) -> (&'a str, &'a str) {
        (
            self.title.as_deref().unwrap_or(&current.title),
            self.username.as_deref().unwrap_or(&current.username),
        )
    }
}

impl Validate for MediaPatch {
    fn validate(&self) -> Result<(), TypeError> {
        if let Some(title) = &self.title {
            require_non_empty("title", title)?;
        }
        if let Some(username) = &self.username {
            require_non_empty("username", username)?;
        }
        Ok(())
    }
}
