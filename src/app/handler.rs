//! Event dispatch from presentation code into the list controller.
//!
//! Presentation code translates DOM or terminal input into [`Event`]s and hands
//! them to [`handle_event`], which calls the matching controller operation and
//! reports whether the view needs to be re-rendered.
//!
//! # Event Types
//!
//! - **Search**: `SearchInput`, `Tick`
//! - **Pagination**: `GoToPage`, `NextPage`, `PreviousPage`, `ChangeItemsPerPage`
//! - **Form**: `ShowAddForm`, `ShowEditForm`, `HideForm`, `SetField`, `TouchField`, `Submit`
//! - **Delete**: `ConfirmDelete`, `CancelDelete`, `DeleteConfirmed`
//! - **Recovery**: `ClearError`, `ResetLoading`
//!
//! # Example
//!
//! ```rust
//! use hero_roster::app::{handle_event, Event, ListViewController, ManualClock};
//! use hero_roster::{HeroStore, LoadingTracker};
//! use std::rc::Rc;
//!
//! let mut list = ListViewController::new(
//!     Rc::new(HeroStore::seeded()),
//!     Rc::new(LoadingTracker::new()),
//!     Rc::new(ManualClock::new()),
//! );
//! let rerender = pollster::block_on(handle_event(&mut list, Event::NextPage))?;
//! assert!(rerender);
//! # Ok::<(), hero_roster::RosterError>(())
//! ```

use super::controller::{DeleteOutcome, ListViewController, SubmitOutcome};
use super::form::Field;
use crate::domain::error::Result;
use crate::domain::Hero;
use crate::storage::HeroRepository;
use tracing::Instrument;

/// User or timer input for the hero list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Raw value of the search field after a keystroke.
    SearchInput(String),
    /// Timer wake-up; settles debounced search input.
    Tick,

    GoToPage(usize),
    NextPage,
    PreviousPage,
    ChangeItemsPerPage(usize),

    ShowAddForm,
    ShowEditForm(Hero),
    HideForm,
    /// New value for a form field.
    SetField {
        field: Field,
        value: String,
    },
    /// Field lost focus.
    TouchField(Field),
    Submit,

    ConfirmDelete(Hero),
    CancelDelete,
    DeleteConfirmed,

    ClearError,
    /// Emergency recovery: forces the loading tracker back to idle.
    ResetLoading,
}

/// Applies `event` to `controller`.
///
/// Returns `true` when visible state may have changed and the view should be
/// re-rendered.
///
/// # Errors
///
/// Returns [`RosterError::InvalidPageSize`](crate::RosterError::InvalidPageSize)
/// for `ChangeItemsPerPage(0)`. Repository failures are not errors here: they
/// are surfaced through the controller's error state.
pub async fn handle_event<R: HeroRepository>(
    controller: &mut ListViewController<R>,
    event: Event,
) -> Result<bool> {
    let span = tracing::debug_span!("handle_event", event = ?event);
    dispatch(controller, event).instrument(span).await
}

async fn dispatch<R: HeroRepository>(
    controller: &mut ListViewController<R>,
    event: Event,
) -> Result<bool> {
    let rerender = match event {
        Event::SearchInput(raw) => controller.set_search_term(raw),
        Event::Tick => controller.tick(),
        Event::GoToPage(page) => controller.go_to_page(page),
        Event::NextPage => controller.next_page(),
        Event::PreviousPage => controller.previous_page(),
        Event::ChangeItemsPerPage(items_per_page) => {
            controller.change_items_per_page(items_per_page)?;
            true
        }
        Event::ShowAddForm => {
            controller.show_add_form();
            true
        }
        Event::ShowEditForm(hero) => {
            controller.show_edit_form(&hero);
            true
        }
        Event::HideForm => {
            controller.hide_form();
            true
        }
        Event::SetField { field, value } => {
            controller.set_field(field, value);
            true
        }
        Event::TouchField(field) => {
            controller.touch_field(field);
            true
        }
        Event::Submit => {
            let outcome = controller.submit().await;
            tracing::debug!(outcome = ?outcome, "submit handled");
            !matches!(outcome, SubmitOutcome::Busy)
        }
        Event::ConfirmDelete(hero) => {
            controller.confirm_delete(&hero);
            true
        }
        Event::CancelDelete => {
            controller.cancel_delete();
            true
        }
        Event::DeleteConfirmed => {
            let outcome = controller.delete_confirmed().await;
            tracing::debug!(outcome = ?outcome, "delete handled");
            !matches!(outcome, DeleteOutcome::Busy | DeleteOutcome::NothingPending)
        }
        Event::ClearError => {
            controller.clear_error();
            true
        }
        Event::ResetLoading => {
            controller.loading().reset();
            true
        }
    };
    Ok(rerender)
}
