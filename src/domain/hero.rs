//! Hero domain model.
//!
//! A [`Hero`] is the single entity managed by the roster. Its `id` is assigned by
//! the store on creation when left empty, and uniquely identifies the record for
//! the lifetime of the process.

use serde::{Deserialize, Serialize};

/// A hero record.
///
/// # Fields
///
/// - `id`: Store-unique identifier; empty for heroes not yet created
/// - `name`: Display name (required, at least 2 characters)
/// - `superpower`: Primary power (required, at least 3 characters)
/// - `alter_ego`: Secret identity, if any
/// - `city`: Home city (required)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub superpower: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alter_ego: Option<String>,
    pub city: String,
}

impl Hero {
    /// Creates a hero without an id or alter ego.
    ///
    /// # Examples
    ///
    /// ```
    /// use hero_roster::Hero;
    ///
    /// let hero = Hero::new("Batman", "Intelligence", "Gotham").with_alter_ego("Bruce Wayne");
    /// assert!(!hero.has_id());
    /// assert_eq!(hero.alter_ego.as_deref(), Some("Bruce Wayne"));
    /// ```
    pub fn new(
        name: impl Into<String>,
        superpower: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            superpower: superpower.into(),
            alter_ego: None,
            city: city.into(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the alter ego. An empty string clears it.
    #[must_use]
    pub fn with_alter_ego(mut self, alter_ego: impl Into<String>) -> Self {
        let alter_ego = alter_ego.into();
        self.alter_ego = (!alter_ego.is_empty()).then_some(alter_ego);
        self
    }

    /// Returns `true` if the hero carries a non-empty id.
    #[must_use]
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}
