//! CRUD workflow state for the hero list.
//!
//! [`ComponentState`] is owned by the list controller and replaced as a whole on
//! every transition (struct-update merges), never mutated field by field from
//! outside. The add/edit form and the delete confirmation are independent
//! sub-states:
//!
//! ```text
//!            show_add_form            show_edit_form(hero)
//!   Idle ───────────────▶ Adding      Idle ───────────────▶ Editing(id)
//!    ▲    hide_form / saved │           ▲   hide_form / saved  │
//!    └──────────────────────┘           └──────────────────────┘
//!
//!   Idle ── confirm_delete(hero) ──▶ DeleteConfirm ── delete_confirmed / cancel_delete ──▶ Idle
//! ```

use crate::domain::Hero;

/// Whole workflow state of the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentState {
    pub show_form: bool,
    pub is_editing: bool,
    pub editing_hero_id: Option<String>,
    pub show_delete_modal: bool,
    pub hero_to_delete: Option<Hero>,
    /// Most recent operation failure message, if any.
    pub error: Option<String>,
}

impl ComponentState {
    /// Form sub-state derived from the flags.
    #[must_use]
    pub fn mode(&self) -> CrudMode {
        match (self.show_form, self.is_editing, &self.editing_hero_id) {
            (true, true, Some(id)) => CrudMode::Editing(id.clone()),
            (true, _, _) => CrudMode::Adding,
            _ => CrudMode::Idle,
        }
    }

    #[must_use]
    pub fn is_confirming_delete(&self) -> bool {
        self.show_delete_modal && self.hero_to_delete.is_some()
    }
}

/// Form sub-state of the CRUD workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrudMode {
    /// No form open.
    Idle,
    /// Creating a new hero.
    Adding,
    /// Editing the hero with the given id.
    Editing(String),
}

/// Repository operation that can fail and surface an error to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudOperation {
    Create,
    Update,
    Delete,
}

impl CrudOperation {
    /// Operation name for diagnostics ("creating hero", ...).
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Create => "creating hero",
            Self::Update => "updating hero",
            Self::Delete => "deleting hero",
        }
    }

    /// Message shown to the user when the operation fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Error creating hero.",
            Self::Update => "Error updating hero.",
            Self::Delete => "Error deleting hero.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        let state = ComponentState::default();
        assert_eq!(state.mode(), CrudMode::Idle);
        assert!(!state.is_confirming_delete());
        assert!(state.error.is_none());
    }

    #[test]
    fn mode_follows_flags() {
        let adding = ComponentState {
            show_form: true,
            ..ComponentState::default()
        };
        let editing = ComponentState {
            is_editing: true,
            editing_hero_id: Some("7".to_string()),
            ..adding.clone()
        };

        assert_eq!(adding.mode(), CrudMode::Adding);
        assert_eq!(editing.mode(), CrudMode::Editing("7".to_string()));
    }

    #[test]
    fn failure_messages_name_the_operation() {
        assert_eq!(CrudOperation::Create.failure_message(), "Error creating hero.");
        assert_eq!(CrudOperation::Update.failure_message(), "Error updating hero.");
        assert_eq!(CrudOperation::Delete.failure_message(), "Error deleting hero.");
    }
}
