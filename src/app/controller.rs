//! List view controller: search, pagination, and the CRUD workflow.
//!
//! [`ListViewController`] composes a [`HeroRepository`], a shared
//! [`LoadingTracker`], and a [`Clock`] into the derived, paginated hero list the
//! presentation layer renders. It owns the workflow [`ComponentState`], the
//! in-progress [`HeroForm`], the search debouncer, and the pagination parameters.
//!
//! # Data Flow
//!
//! ```text
//! keystroke → set_search_term → Debouncer ──(300ms quiet, changed)──▶ effective term
//!                                                                        │
//! repository snapshot (revision) ───────────────────────────▶ filtered_view (memoized)
//!                                                                        │
//!                                       Pagination (clamped) ──▶ paginated_view
//! ```
//!
//! # Overlapping Operations
//!
//! `submit` and `delete_confirmed` take `&mut self`, so operations issued through
//! one controller are serialized. When the shared tracker reports another
//! operation in flight, they return `Busy` without touching any state.

use super::clock::Clock;
use super::debounce::{Debouncer, SEARCH_DEBOUNCE};
use super::form::{Field, HeroForm};
use super::pagination::{Pagination, PaginationState, DEFAULT_ITEMS_PER_PAGE};
use super::state::{ComponentState, CrudMode, CrudOperation};
use crate::domain::error::{Result, RosterError};
use crate::domain::Hero;
use crate::loading::LoadingTracker;
use crate::storage::{Feed, HeroRepository, SubscriptionId};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Tunables for a [`ListViewController`].
///
/// Validated by [`ListViewController::with_settings`]: `items_per_page` must be
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Initial page size.
    pub items_per_page: usize,
    /// Quiet period before search input takes effect.
    pub debounce: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            debounce: SEARCH_DEBOUNCE,
        }
    }
}

/// Result of [`ListViewController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; all fields were marked touched.
    Invalid,
    /// Another tracked operation is in flight; nothing was attempted.
    Busy,
    /// The hero was created or updated and the form closed.
    Saved(Hero),
    /// The repository call failed, or the hero being edited no longer exists;
    /// the form stays open with an error set.
    Failed,
}

/// Result of [`ListViewController::delete_confirmed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No delete confirmation was open.
    NothingPending,
    /// Another tracked operation is in flight; nothing was attempted.
    Busy,
    /// The hero with this id was deleted and the confirmation closed.
    Deleted(String),
    /// The repository call failed; the confirmation stays open with an error set.
    Failed,
}

#[derive(Debug)]
struct FilterCache {
    revision: u64,
    term: String,
    heroes: Rc<[Hero]>,
}

/// Orchestrates the searchable, paginated hero list and its CRUD workflow.
///
/// # Examples
///
/// ```
/// use hero_roster::app::{ListViewController, ManualClock};
/// use hero_roster::{HeroStore, LoadingTracker};
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let clock = Rc::new(ManualClock::new());
/// let mut list = ListViewController::new(
///     Rc::new(HeroStore::seeded()),
///     Rc::new(LoadingTracker::new()),
///     clock.clone(),
/// );
///
/// list.set_search_term("lantern");
/// clock.advance(Duration::from_millis(300));
/// assert!(list.tick());
/// assert_eq!(list.filtered_view().len(), 3);
/// ```
pub struct ListViewController<R: HeroRepository> {
    repository: Rc<R>,
    loading: Rc<LoadingTracker>,
    clock: Rc<dyn Clock>,
    search: RefCell<Debouncer<String>>,
    search_changes: Feed<String>,
    pagination: Pagination,
    state: ComponentState,
    form: HeroForm,
    filtered_cache: RefCell<Option<FilterCache>>,
}

impl<R: HeroRepository> ListViewController<R> {
    /// Creates a controller with default settings (5 per page, 300ms debounce).
    pub fn new(repository: Rc<R>, loading: Rc<LoadingTracker>, clock: Rc<dyn Clock>) -> Self {
        Self::build(repository, loading, clock, ControllerSettings::default())
    }

    /// Creates a controller with explicit settings.
    ///
    /// # Parameters
    ///
    /// * `repository` - Hero storage the list reads from and writes to
    /// * `loading` - Tracker shared with other components to gate input
    /// * `clock` - Time source for the search debounce
    /// * `settings` - Initial page size and debounce delay
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidPageSize`] when `settings.items_per_page`
    /// is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hero_roster::app::{ControllerSettings, ListViewController, ManualClock};
    /// use hero_roster::{HeroStore, LoadingTracker};
    /// use std::rc::Rc;
    /// use std::time::Duration;
    ///
    /// let settings = ControllerSettings {
    ///     items_per_page: 10,
    ///     debounce: Duration::from_millis(150),
    /// };
    /// let list = ListViewController::with_settings(
    ///     Rc::new(HeroStore::seeded()),
    ///     Rc::new(LoadingTracker::new()),
    ///     Rc::new(ManualClock::new()),
    ///     settings,
    /// )?;
    /// assert_eq!(list.pagination_state().total_pages, 2);
    /// # Ok::<(), hero_roster::RosterError>(())
    /// ```
    pub fn with_settings(
        repository: Rc<R>,
        loading: Rc<LoadingTracker>,
        clock: Rc<dyn Clock>,
        settings: ControllerSettings,
    ) -> Result<Self> {
        if settings.items_per_page == 0 {
            return Err(RosterError::InvalidPageSize(settings.items_per_page));
        }
        Ok(Self::build(repository, loading, clock, settings))
    }

    fn build(
        repository: Rc<R>,
        loading: Rc<LoadingTracker>,
        clock: Rc<dyn Clock>,
        settings: ControllerSettings,
    ) -> Self {
        tracing::debug!(
            items_per_page = settings.items_per_page,
            debounce_ms = u64::try_from(settings.debounce.as_millis()).unwrap_or(u64::MAX),
            "creating list view controller"
        );

        Self {
            repository,
            loading,
            clock,
            search: RefCell::new(Debouncer::new(settings.debounce, String::new())),
            search_changes: Feed::new(),
            pagination: Pagination::new(settings.items_per_page),
            state: ComponentState::default(),
            form: HeroForm::new(),
            filtered_cache: RefCell::new(None),
        }
    }

    /// The repository shared with other views.
    #[must_use]
    pub fn repository(&self) -> &Rc<R> {
        &self.repository
    }

    #[must_use]
    pub fn loading(&self) -> &Rc<LoadingTracker> {
        &self.loading
    }

    /// `true` while any operation on the shared tracker is in flight, whether
    /// or not this controller started it. Inputs should be disabled meanwhile.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.loading.is_busy()
    }

    // Search

    /// Feeds a raw search-field value into the debouncer.
    ///
    /// Input that was already stable for the full delay takes effect before
    /// `raw` replaces it, so a late keystroke never swallows a settled term.
    ///
    /// Returns `true` if the effective term changed during this call.
    pub fn set_search_term(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        tracing::trace!(raw = %raw, "search input");

        let now = self.clock.now();
        let settled = self.search.get_mut().push(raw, now);
        let settled = settled.is_some_and(|term| self.publish_term(&term));
        self.tick() || settled
    }

    /// Settles the pending search input if it has been stable long enough.
    ///
    /// Reads of the effective term settle overdue input too, so hosts that
    /// read before ticking may see `false` here for a change already applied.
    ///
    /// Returns `true` when the effective search term changed.
    pub fn tick(&mut self) -> bool {
        self.settle()
    }

    /// Debounced, deduplicated term currently used for filtering.
    ///
    /// Pending input whose delay has elapsed is applied first.
    #[must_use]
    pub fn search_term(&self) -> String {
        self.settle();
        self.search.borrow().current().clone()
    }

    /// Latest raw input, which may not have taken effect yet.
    #[must_use]
    pub fn raw_search_term(&self) -> String {
        self.search.borrow().latest().clone()
    }

    /// Clock time at which pending input settles; hosts schedule a `tick` then.
    #[must_use]
    pub fn search_deadline(&self) -> Option<Duration> {
        self.search.borrow().deadline()
    }

    fn settle(&self) -> bool {
        let settled = self.search.borrow_mut().poll(self.clock.now());
        settled.is_some_and(|term| self.publish_term(&term))
    }

    fn publish_term(&self, term: &String) -> bool {
        tracing::debug!(term = %term, "effective search term changed");
        self.search_changes.publish(term);
        true
    }

    /// Registers a listener for effective search term changes.
    pub fn subscribe_search_term(&self, listener: impl Fn(&String) + 'static) -> SubscriptionId {
        self.search_changes.subscribe(listener)
    }

    /// Removes a listener registered with
    /// [`subscribe_search_term`](Self::subscribe_search_term).
    pub fn unsubscribe_search_term(&self, id: SubscriptionId) -> bool {
        self.search_changes.unsubscribe(id)
    }

    // Derived views

    /// Heroes matching the effective search term, in store order.
    ///
    /// Memoized until the repository revision or the effective term changes.
    #[must_use]
    pub fn filtered_view(&self) -> Rc<[Hero]> {
        let revision = self.repository.revision();
        let term = self.search_term();

        if let Some(cache) = self.filtered_cache.borrow().as_ref() {
            if cache.revision == revision && cache.term == term {
                return Rc::clone(&cache.heroes);
            }
        }

        let heroes = self.repository.search_heroes(&term);
        tracing::trace!(revision, matched = heroes.len(), "filtered view recomputed");
        *self.filtered_cache.borrow_mut() = Some(FilterCache {
            revision,
            term,
            heroes: Rc::clone(&heroes),
        });
        heroes
    }

    #[must_use]
    pub fn pagination_state(&self) -> PaginationState {
        self.pagination.resolve(self.filtered_view().len())
    }

    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        self.pagination_state().page_numbers()
    }

    #[must_use]
    pub fn items_per_page(&self) -> usize {
        self.pagination.items_per_page()
    }

    /// Heroes on the clamped current page.
    #[must_use]
    pub fn paginated_view(&self) -> Vec<Hero> {
        let filtered = self.filtered_view();
        let state = self.pagination.resolve(filtered.len());
        filtered[state.bounds()].to_vec()
    }

    // Pagination

    /// Moves to `page` if it exists for the current filtered count.
    ///
    /// Out-of-range requests are ignored. Returns whether the page was set.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.filtered_view().len();
        let moved = self.pagination.go_to(page, total);
        if !moved {
            tracing::debug!(page, total, "page request out of range, ignored");
        }
        moved
    }

    /// Advances one page; ignored on the last page.
    pub fn next_page(&mut self) -> bool {
        let current = self.pagination_state().current_page;
        self.go_to_page(current + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        let current = self.pagination_state().current_page;
        self.go_to_page(current.saturating_sub(1))
    }

    /// Changes the page size and returns to page one.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidPageSize`] for a size of zero; nothing changes.
    pub fn change_items_per_page(&mut self, items_per_page: usize) -> Result<()> {
        if !self.pagination.set_items_per_page(items_per_page) {
            return Err(RosterError::InvalidPageSize(items_per_page));
        }
        tracing::debug!(items_per_page, "page size changed");
        Ok(())
    }

    // Workflow state

    #[must_use]
    pub fn state(&self) -> &ComponentState {
        &self.state
    }

    #[must_use]
    pub fn mode(&self) -> CrudMode {
        self.state.mode()
    }

    /// User-facing message of the last failed operation.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.merge(ComponentState {
            error: None,
            ..self.state.clone()
        });
    }

    /// Opens an empty form for a new hero.
    pub fn show_add_form(&mut self) {
        self.merge(ComponentState {
            show_form: true,
            is_editing: false,
            editing_hero_id: None,
            error: None,
            ..self.state.clone()
        });
        self.form.reset();
    }

    /// Opens the form pre-filled with `hero` for editing.
    pub fn show_edit_form(&mut self, hero: &Hero) {
        self.merge(ComponentState {
            show_form: true,
            is_editing: true,
            editing_hero_id: Some(hero.id.clone()),
            error: None,
            ..self.state.clone()
        });
        self.form.populate(hero);
    }

    /// Closes the form and discards its contents.
    pub fn hide_form(&mut self) {
        self.merge(ComponentState {
            show_form: false,
            is_editing: false,
            editing_hero_id: None,
            error: None,
            ..self.state.clone()
        });
        self.form.reset();
    }

    /// Opens the delete confirmation for `hero`. The form state is untouched.
    pub fn confirm_delete(&mut self, hero: &Hero) {
        self.merge(ComponentState {
            show_delete_modal: true,
            hero_to_delete: Some(hero.clone()),
            error: None,
            ..self.state.clone()
        });
    }

    /// Closes the delete confirmation without touching the store.
    pub fn cancel_delete(&mut self) {
        self.merge(ComponentState {
            show_delete_modal: false,
            hero_to_delete: None,
            error: None,
            ..self.state.clone()
        });
    }

    // Form

    #[must_use]
    pub fn hero_form(&self) -> &HeroForm {
        &self.form
    }

    pub fn hero_form_mut(&mut self) -> &mut HeroForm {
        &mut self.form
    }

    /// Stores a raw form value. Validation runs on read, not here.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_value(field, value);
    }

    /// Marks `field` as visited so its validation message becomes visible.
    pub fn touch_field(&mut self, field: Field) {
        self.form.touch(field);
    }

    #[must_use]
    pub fn is_field_invalid(&self, field: Field) -> bool {
        self.form.is_field_invalid(field)
    }

    /// Visible validation message for `field`.
    ///
    /// # Returns
    ///
    /// `None` while the field is untouched or valid, otherwise the first
    /// failing rule as text, e.g. `"Name is required"`.
    #[must_use]
    pub fn field_error(&self, field: Field) -> Option<String> {
        self.form.field_error(field)
    }

    // Repository operations

    /// Validates the form and creates or updates the hero.
    ///
    /// On failure the form stays open and [`error`](Self::error) names the
    /// failed operation; the underlying error is only logged. Editing a hero
    /// that another store user removed in the meantime fails the same way
    /// instead of silently discarding the edit.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.form.is_valid() {
            self.form.mark_all_touched();
            tracing::debug!("hero form invalid, submission skipped");
            return SubmitOutcome::Invalid;
        }

        if self.loading.is_busy() {
            tracing::debug!(in_flight = self.loading.count(), "submission refused while busy");
            return SubmitOutcome::Busy;
        }

        self.clear_error();
        let repository = &self.repository;
        let (operation, result) = match self.state.mode() {
            CrudMode::Editing(id) if !repository.heroes().iter().any(|hero| hero.id == id) => {
                tracing::warn!(id = %id, "hero under edit no longer exists");
                (CrudOperation::Update, Err(RosterError::HeroNotFound(id)))
            }
            CrudMode::Editing(id) => {
                let hero = Hero {
                    id,
                    ..self.form.to_hero()
                };
                let update = hero.clone();
                let result = self
                    .loading
                    .run(|| repository.update_hero(update))
                    .await
                    .map(|()| hero);
                (CrudOperation::Update, result)
            }
            CrudMode::Adding | CrudMode::Idle => {
                let draft = self.form.to_hero();
                let result = self.loading.run(|| repository.create_hero(draft)).await;
                (CrudOperation::Create, result)
            }
        };

        match result {
            Ok(hero) => {
                tracing::info!(id = %hero.id, operation = operation.describe(), "hero saved");
                self.hide_form();
                SubmitOutcome::Saved(hero)
            }
            Err(e) => {
                self.fail(operation, &e);
                SubmitOutcome::Failed
            }
        }
    }

    /// Deletes the hero awaiting confirmation.
    ///
    /// If that hero is also open in the edit form, the form is closed too.
    pub async fn delete_confirmed(&mut self) -> DeleteOutcome {
        let Some(hero) = self.state.hero_to_delete.clone() else {
            return DeleteOutcome::NothingPending;
        };

        if self.loading.is_busy() {
            tracing::debug!(in_flight = self.loading.count(), "delete refused while busy");
            return DeleteOutcome::Busy;
        }

        self.clear_error();
        let repository = &self.repository;
        let id = hero.id.clone();
        let result = self.loading.run(|| repository.delete_hero(id)).await;

        match result {
            Ok(()) => {
                tracing::info!(id = %hero.id, "hero deleted");
                self.cancel_delete();
                if self.state.editing_hero_id.as_deref() == Some(hero.id.as_str()) {
                    tracing::debug!("closing edit form of deleted hero");
                    self.hide_form();
                }
                DeleteOutcome::Deleted(hero.id)
            }
            Err(e) => {
                self.fail(CrudOperation::Delete, &e);
                DeleteOutcome::Failed
            }
        }
    }

    fn fail(&mut self, operation: CrudOperation, error: &RosterError) {
        tracing::error!(error = %error, operation = operation.describe(), "hero operation failed");
        self.merge(ComponentState {
            error: Some(operation.failure_message().to_string()),
            ..self.state.clone()
        });
    }

    fn merge(&mut self, next: ComponentState) {
        if next != self.state {
            tracing::trace!(state = ?next, "component state updated");
            self.state = next;
        }
    }
}
