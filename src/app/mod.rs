//! Application layer: the list view controller and its building blocks.
//!
//! Sits between presentation code and the storage/loading layers:
//!
//! ```text
//! Input → Events → handle_event → ListViewController → HeroRepository
//!                                      │        │
//!                                 Debouncer  Pagination   LoadingTracker
//!                                      │
//!                                    Clock
//! ```
//!
//! # Modules
//!
//! - [`clock`]: Time sources (system and manual/virtual)
//! - [`debounce`]: Debounce-and-dedupe for search input
//! - [`pagination`]: Page math with clamping
//! - [`form`]: Hero form values, touched flags, validation
//! - [`state`]: CRUD workflow state
//! - [`controller`]: The orchestrating list view controller
//! - [`handler`]: Event dispatch into the controller

pub mod clock;
pub mod controller;
pub mod debounce;
pub mod form;
pub mod handler;
pub mod pagination;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{ControllerSettings, DeleteOutcome, ListViewController, SubmitOutcome};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use form::{Field, FieldError, HeroForm};
pub use handler::{handle_event, Event};
pub use pagination::{Pagination, PaginationState, DEFAULT_ITEMS_PER_PAGE, ITEMS_PER_PAGE_OPTIONS};
pub use state::{ComponentState, CrudMode, CrudOperation};
