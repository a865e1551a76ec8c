use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw row id.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Media`](crate::Media) row, assigned by the store.
    MediaId
);

define_id!(
    /// Identifier of a [`Post`](crate::Post) row, assigned by the store.
    PostId
);

define_id!(
    /// Identifier of a [`Publication`](crate::Publication) row, assigned by the store.
    PublicationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_number() {
        let id = MediaId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let parsed: PostId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed.get(), 7);
    }

    #[test]
    fn display_and_debug() {
        let id = PublicationId::new(3);
        assert_eq!(format!("{id}"), "3");
        assert_eq!(format!("{id:?}"), "PublicationId(3)");
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(MediaId::new(1) < MediaId::new(2));
    }
}
