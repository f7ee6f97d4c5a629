//! View model types representing renderable list state.
//!
//! View models are immutable snapshots computed from a [`ListViewController`]
//! by [`compute_viewmodel`]. They contain no business logic, only display-ready
//! data, so presentation code can render them without touching the controller.
//!
//! # Example
//!
//! ```rust
//! use hero_roster::app::{ListViewController, ManualClock};
//! use hero_roster::ui::compute_viewmodel;
//! use hero_roster::{HeroStore, LoadingTracker};
//! use std::rc::Rc;
//!
//! let list = ListViewController::new(
//!     Rc::new(HeroStore::seeded()),
//!     Rc::new(LoadingTracker::new()),
//!     Rc::new(ManualClock::new()),
//! );
//! let vm = compute_viewmodel(&list);
//! assert_eq!(vm.rows.len(), 5);
//! assert_eq!(vm.page_numbers, vec![1, 2, 3]);
//! ```

use crate::app::{CrudMode, Field, ListViewController, PaginationState, ITEMS_PER_PAGE_OPTIONS};
use crate::domain::Hero;
use crate::storage::HeroRepository;

/// Complete view model for the hero list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    /// Heroes on the current page.
    pub rows: Vec<HeroRow>,

    pub header: HeaderInfo,

    pub pagination: PaginationState,

    /// Page numbers for the page selector.
    pub page_numbers: Vec<usize>,

    /// Page sizes offered in the items-per-page selector.
    pub items_per_page_options: &'static [usize],

    /// Effective (debounced) search term.
    pub search_term: String,

    /// Inputs should be disabled while true.
    pub is_busy: bool,

    /// Operation failure message, if any.
    pub error: Option<String>,

    /// Add/edit form, when open.
    pub form: Option<FormView>,

    /// Delete confirmation, when open.
    pub delete_prompt: Option<DeletePrompt>,

    /// Shown instead of rows when nothing matches.
    pub empty_state: Option<EmptyState>,
}

/// One hero row. `id` doubles as the stable render key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroRow {
    pub id: String,
    pub name: String,
    pub superpower: String,
    pub alter_ego: String,
    pub city: String,
}

impl From<&Hero> for HeroRow {
    fn from(hero: &Hero) -> Self {
        Self {
            id: hero.id.clone(),
            name: hero.name.clone(),
            superpower: hero.superpower.clone(),
            alter_ego: hero.alter_ego.clone().unwrap_or_default(),
            city: hero.city.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, e.g. `"Heroes (13)"`.
    pub title: String,

    /// Number of heroes matching the current search.
    pub matching: usize,
}

/// Open add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub submit_enabled: bool,
}

/// One form input with its visible validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: String,
    pub value: String,
    pub invalid: bool,
    pub error: Option<String>,
}

/// Open delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub hero_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Builds the view model for the controller's current state.
#[must_use]
pub fn compute_viewmodel<R: HeroRepository>(controller: &ListViewController<R>) -> ListViewModel {
    let _span = tracing::trace_span!("compute_viewmodel").entered();

    let total = controller.repository().heroes().len();
    let pagination = controller.pagination_state();
    let rows: Vec<HeroRow> = controller.paginated_view().iter().map(HeroRow::from).collect();
    let search_term = controller.search_term();

    let empty_state = rows.is_empty().then(|| compute_empty_state(total, &search_term));

    ListViewModel {
        rows,
        header: HeaderInfo {
            title: format!("Heroes ({total})"),
            matching: pagination.total_items,
        },
        pagination,
        page_numbers: pagination.page_numbers(),
        items_per_page_options: &ITEMS_PER_PAGE_OPTIONS,
        search_term,
        is_busy: controller.is_busy(),
        error: controller.error().map(str::to_string),
        form: compute_form(controller),
        delete_prompt: compute_delete_prompt(controller),
        empty_state,
    }
}

fn compute_delete_prompt<R: HeroRepository>(
    controller: &ListViewController<R>,
) -> Option<DeletePrompt> {
    let state = controller.state();
    if !state.is_confirming_delete() {
        return None;
    }

    state.hero_to_delete.as_ref().map(|hero| DeletePrompt {
        hero_id: hero.id.clone(),
        message: format!("Are you sure you want to delete {}?", hero.name),
    })
}

fn compute_form<R: HeroRepository>(controller: &ListViewController<R>) -> Option<FormView> {
    let title = match controller.mode() {
        CrudMode::Idle => return None,
        CrudMode::Adding => "Add Hero",
        CrudMode::Editing(_) => "Edit Hero",
    };

    let form = controller.hero_form();
    let fields = Field::ALL
        .into_iter()
        .map(|field| FieldView {
            field,
            label: field.label(),
            value: form.value(field).to_string(),
            invalid: form.is_field_invalid(field),
            error: form.field_error(field),
        })
        .collect();

    Some(FormView {
        title: title.to_string(),
        fields,
        submit_enabled: !controller.is_busy(),
    })
}

fn compute_empty_state(total: usize, search_term: &str) -> EmptyState {
    if total == 0 {
        EmptyState {
            message: "No heroes yet".to_string(),
            subtitle: "Add a hero to get started".to_string(),
        }
    } else {
        EmptyState {
            message: "No heroes found".to_string(),
            subtitle: format!("Nothing matches \"{}\"", search_term.trim()),
        }
    }
}
