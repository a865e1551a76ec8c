use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TypeError;
use crate::ids::PostId;
use crate::validation::{require_http_url, require_non_empty, Validate};

/// A content item that can be scheduled on one or more media.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
}

impl Post {
    /// Overwrite the fields supplied by `patch`.
    pub fn apply(&mut self, patch: &PostPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(image) = &patch.image {
            self.image.clone_from(image);
        }
    }
}

/// Fields required to create a [`Post`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        image: Option<String>,
    ) -> Result<Self, TypeError> {
        let draft = Self {
            title: title.into(),
            text: text.into(),
            image,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            text: self.text,
            image: self.image,
        }
    }
}

impl Validate for PostDraft {
    fn validate(&self) -> Result<(), TypeError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("text", &self.text)?;
        if let Some(image) = &self.image {
            require_http_url("image", image)?;
        }
        Ok(())
    }
}

/// Partial update of a [`Post`]; absent fields are left untouched.
///
/// `image` distinguishes a missing key (`None`) from an explicit `null`
/// (`Some(None)`), which clears the stored image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub image: Option<Option<String>>,
}

/// Any value reaching this function was present in the input, `null` included.
fn present_or_null<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Option<String>>, D::Error> {
    Option::<String>::deserialize(deserializer).map(Some)
}

impl Validate for PostPatch {
    fn validate(&self) -> Result<(), TypeError> {
        if let Some(title) = &self.title {
            require_non_empty("title", title)?;
        }
        if let Some(text) = &self.text {
            require_non_empty("text", text)?;
        }
        if let Some(Some(image)) = &self.image {
            require_http_url("image", image)?;
        }
        Ok(())
    }
}
