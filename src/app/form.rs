//! In-progress hero form with field validation.
//!
//! Each editable field keeps its raw value and a touched flag. Validation errors
//! exist whenever the value breaks a rule, but they are only *visible* once the
//! field is touched, which is what [`HeroForm::is_field_invalid`] and
//! [`HeroForm::field_error`] report.

use crate::domain::error::RosterError;
use crate::domain::Hero;
use std::fmt;
use std::str::FromStr;

/// Editable hero form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Superpower,
    AlterEgo,
    City,
}

struct Rule {
    required: bool,
    min_length: Option<usize>,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Superpower, Self::AlterEgo, Self::City];

    /// Form key of the field, as presentation code names it.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Superpower => "superpower",
            Self::AlterEgo => "alterEgo",
            Self::City => "city",
        }
    }

    /// Field key with its first character upper-cased, used in messages.
    #[must_use]
    pub fn label(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    const fn rule(self) -> Rule {
        match self {
            Self::Name => Rule {
                required: true,
                min_length: Some(2),
            },
            Self::Superpower => Rule {
                required: true,
                min_length: Some(3),
            },
            Self::AlterEgo => Rule {
                required: false,
                min_length: None,
            },
            Self::City => Rule {
                required: true,
                min_length: None,
            },
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Superpower => 1,
            Self::AlterEgo => 2,
            Self::City => 3,
        }
    }

    /// Checks `value` against this field's rules.
    ///
    /// Only the empty string counts as missing; minimum lengths count characters
    /// and do not apply to an empty value.
    #[must_use]
    pub fn validate(self, value: &str) -> Option<FieldError> {
        let rule = self.rule();
        if value.is_empty() {
            return rule.required.then_some(FieldError::Required);
        }

        let length = value.chars().count();
        match rule.min_length {
            Some(required) if length < required => Some(FieldError::MinLength {
                required,
                actual: length,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = RosterError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| RosterError::UnknownField(key.to_string()))
    }
}

/// Validation failure for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    MinLength { required: usize, actual: usize },
}

impl FieldError {
    /// User-facing message for `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hero_roster::app::{Field, FieldError};
    ///
    /// assert_eq!(FieldError::Required.message(Field::Name), "Name is required");
    /// assert_eq!(
    ///     FieldError::MinLength { required: 3, actual: 1 }.message(Field::Superpower),
    ///     "Superpower must be at least 3 characters"
    /// );
    /// ```
    #[must_use]
    pub fn message(self, field: Field) -> String {
        match self {
            Self::Required => format!("{} is required", field.label()),
            Self::MinLength { required, .. } => {
                format!("{} must be at least {required} characters", field.label())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Control {
    value: String,
    touched: bool,
}

/// The hero form backing the add and edit workflows.
///
/// # Examples
///
/// ```
/// use hero_roster::app::{Field, HeroForm};
///
/// let mut form = HeroForm::new();
/// assert!(!form.is_valid());
/// assert!(!form.is_field_invalid(Field::Name)); // not touched yet
///
/// form.mark_all_touched();
/// assert_eq!(form.field_error(Field::Name).as_deref(), Some("Name is required"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroForm {
    id: String,
    controls: [Control; 4],
}

impl HeroForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every value and touched flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Loads `hero` into the form, replacing all values.
    pub fn populate(&mut self, hero: &Hero) {
        self.reset();
        self.id.clone_from(&hero.id);
        self.controls[Field::Name.index()].value.clone_from(&hero.name);
        self.controls[Field::Superpower.index()].value.clone_from(&hero.superpower);
        self.controls[Field::AlterEgo.index()].value = hero.alter_ego.clone().unwrap_or_default();
        self.controls[Field::City.index()].value.clone_from(&hero.city);
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.controls[field.index()].value = value.into();
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        &self.controls[field.index()].value
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Marks a field as interacted with, making its errors visible.
    pub fn touch(&mut self, field: Field) {
        self.controls[field.index()].touched = true;
    }

    pub fn mark_all_touched(&mut self) {
        for control in &mut self.controls {
            control.touched = true;
        }
    }

    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        self.controls[field.index()].touched
    }

    /// Current validation error of `field`, visible or not.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<FieldError> {
        field.validate(self.value(field))
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.error(field).is_none())
    }

    /// `true` when `field` is both invalid and touched.
    #[must_use]
    pub fn is_field_invalid(&self, field: Field) -> bool {
        self.is_touched(field) && self.error(field).is_some()
    }

    /// Visible error message for `field`, if any.
    #[must_use]
    pub fn field_error(&self, field: Field) -> Option<String> {
        if !self.is_touched(field) {
            return None;
        }
        self.error(field).map(|error| error.message(field))
    }

    /// Builds a hero from the current values. An empty alter ego becomes `None`.
    #[must_use]
    pub fn to_hero(&self) -> Hero {
        Hero::new(
            self.value(Field::Name),
            self.value(Field::Superpower),
            self.value(Field::City),
        )
        .with_id(self.id.clone())
        .with_alter_ego(self.value(Field::AlterEgo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> HeroForm {
        let mut form = HeroForm::new();
        form.set_value(Field::Name, "Storm");
        form.set_value(Field::Superpower, "Weather");
        form.set_value(Field::City, "Harlem");
        form
    }

    #[test]
    fn labels_capitalize_first_character() {
        assert_eq!(Field::Name.label(), "Name");
        assert_eq!(Field::AlterEgo.label(), "AlterEgo");
    }

    #[test]
    fn field_keys_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>().unwrap(), field);
        }
        assert!(matches!(
            "power".parse::<Field>(),
            Err(RosterError::UnknownField(key)) if key == "power"
        ));
    }

    #[test]
    fn minimum_lengths_are_enforced() {
        let mut form = filled();
        form.set_value(Field::Name, "X");
        form.set_value(Field::Superpower, "Ab");
        form.mark_all_touched();

        assert_eq!(
            form.field_error(Field::Name).as_deref(),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(
            form.field_error(Field::Superpower).as_deref(),
            Some("Superpower must be at least 3 characters")
        );
        assert!(!form.is_valid());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(Field::Name.validate("Æø"), None);
    }

    #[test]
    fn alter_ego_is_optional() {
        let form = filled();
        assert!(form.is_valid());
        assert_eq!(form.to_hero().alter_ego, None);
    }

    #[test]
    fn city_only_requires_presence() {
        assert_eq!(Field::City.validate("X"), None);
        assert_eq!(Field::City.validate(""), Some(FieldError::Required));
    }

    #[test]
    fn errors_hidden_until_touched() {
        let mut form = HeroForm::new();
        assert!(form.error(Field::City).is_some());
        assert!(!form.is_field_invalid(Field::City));
        assert_eq!(form.field_error(Field::City), None);

        form.touch(Field::City);
        assert!(form.is_field_invalid(Field::City));
        assert_eq!(form.field_error(Field::City).as_deref(), Some("City is required"));
    }

    #[test]
    fn populate_then_to_hero_preserves_record() {
        let hero = Hero::new("Batman", "Intelligence", "Gotham")
            .with_id("3")
            .with_alter_ego("Bruce Wayne");
        let mut form = HeroForm::new();
        form.touch(Field::Name);
        form.populate(&hero);

        assert_eq!(form.to_hero(), hero);
        assert!(!form.is_touched(Field::Name));
    }

    #[test]
    fn reset_clears_values_and_touched_flags() {
        let mut form = filled();
        form.mark_all_touched();
        form.reset();
        assert_eq!(form, HeroForm::new());
    }
}
