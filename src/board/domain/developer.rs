//! Read-only developer directory used to resolve task assignees.

use super::DeveloperId;
use serde::{Deserialize, Serialize};

/// A developer that tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    id: DeveloperId,
    name: String,
    avatar: Option<String>,
}

impl Developer {
    /// Creates a developer entry without an avatar.
    #[must_use]
    pub fn new(id: DeveloperId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: None,
        }
    }

    /// Sets the avatar image URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Returns the developer identifier.
    #[must_use]
    pub const fn id(&self) -> &DeveloperId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the avatar image URL, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }
}

/// Fixed lookup table of developers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperDirectory {
    developers: Vec<Developer>,
}

impl DeveloperDirectory {
    /// Creates a directory from the given entries.
    ///
    /// Later entries with a duplicate id are ignored.
    #[must_use]
    pub fn new(developers: impl IntoIterator<Item = Developer>) -> Self {
        let mut unique: Vec<Developer> = Vec::new();
        for developer in developers {
            if !unique.iter().any(|known| known.id == developer.id) {
                unique.push(developer);
            }
        }
        Self { developers: unique }
    }

    /// Resolves a developer by identifier.
    #[must_use]
    pub fn resolve(&self, id: &DeveloperId) -> Option<&Developer> {
        self.developers.iter().find(|developer| developer.id == *id)
    }

    /// Iterates over all developers in directory order.
    pub fn iter(&self) -> impl Iterator<Item = &Developer> {
        self.developers.iter()
    }

    /// Returns the number of developers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.developers.len()
    }

    /// Returns `true` when the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.developers.is_empty()
    }
}

impl Default for DeveloperDirectory {
    fn default() -> Self {
        Self::new([
            Developer::new(DeveloperId::new("dev1"), "Developer 1").with_avatar(
                "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&cs=tinysrgb&w=150",
            ),
            Developer::new(DeveloperId::new("dev2"), "Developer 2").with_avatar(
                "https://images.pexels.com/photos/415829/pexels-photo-415829.jpeg?auto=compress&cs=tinysrgb&w=150",
            ),
        ])
    }
}
