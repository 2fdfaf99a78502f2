//! Identifier types for the board domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(value.trim()).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a project.
    ProjectId
);

uuid_identifier!(
    /// Unique identifier for a board column.
    ColumnId
);

uuid_identifier!(
    /// Unique identifier for a task.
    TaskId
);

impl ColumnId {
    /// Renders the drop-target identity the drag collaborator attaches to
    /// this column's drop zone.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_store::board::domain::ColumnId;
    ///
    /// let column = ColumnId::new();
    /// let target = column.target_id("column-");
    /// assert!(target.starts_with("column-"));
    /// assert!(target.ends_with(&column.to_string()));
    /// ```
    #[must_use]
    pub fn target_id(self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }
}

/// Identifier of a developer in the external identity directory.
///
/// Developer ids are opaque strings issued outside the board (for example
/// `dev1`), so they are not UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeveloperId(String);

impl DeveloperId {
    /// Creates a developer identifier, trimming surrounding whitespace.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let raw = value.into();
        Self(raw.trim().to_owned())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DeveloperId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DeveloperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
