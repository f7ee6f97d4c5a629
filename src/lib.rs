//! Hero Roster: the reactive state layer behind a searchable, paginated hero CRUD list.
//!
//! The crate provides:
//! - An in-memory hero store with change notification and substring search
//! - A loading tracker that counts in-flight asynchronous operations
//! - A list view controller combining debounced search, clamped pagination,
//!   and the add/edit/delete workflow with user-facing error reporting
//! - Display-ready view models for whatever host renders the list
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (DOM, terminal, test harness)                 │  ← Renders, feeds input
//! └─────────────────────────────────────────────────────┘
//!                        │ Event / compute_viewmodel
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Debounced search, pagination                     │
//! │  - CRUD workflow state and hero form                │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Loading Layer │
//! │ (ui/)         │   │ (storage/)    │   │ (loading/)    │
//! │ - View models │   │ - HeroStore   │   │ - Busy count  │
//! │               │   │ - Search      │   │ - Guards      │
//! │               │   │ - Repository  │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Hero entity, error types                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing to stderr, optional JSON span export     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: List view controller and event handling
//! - [`domain`]: Core domain types (Hero, errors)
//! - [`loading`]: In-flight operation tracking
//! - [`storage`]: In-memory hero store and repository seam
//! - [`ui`]: View model computation
//! - [`observability`]: Tracing initialization
//!
//! # Configuration
//!
//! ```toml
//! items_per_page = 10
//! debounce_ms = 300
//! seed = true
//! trace_level = "debug"
//! trace_file = "/tmp/hero-roster-spans.jsonl"
//! ```
//!
//! # Example
//!
//! ```rust
//! use hero_roster::app::{handle_event, Event};
//! use hero_roster::{initialize, Config};
//!
//! let mut list = initialize(&Config::default())?;
//! assert_eq!(list.paginated_view().len(), 5);
//!
//! pollster::block_on(handle_event(&mut list, Event::GoToPage(3)))?;
//! assert_eq!(list.paginated_view().len(), 3);
//! # Ok::<(), hero_roster::RosterError>(())
//! ```
//!
//! # Threading
//!
//! Everything is single-threaded: shared pieces are reference counted with
//! [`Rc`](std::rc::Rc) and repository futures are not `Send`. Hosts drive the
//! futures on a local executor and call [`ListViewController::tick`] when a
//! pending search settles.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod loading;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_event, ControllerSettings, Event, ListViewController};
pub use domain::{Hero, Result, RosterError};
pub use loading::LoadingTracker;
pub use storage::{HeroRepository, HeroStore};

use app::{SystemClock, DEFAULT_ITEMS_PER_PAGE, SEARCH_DEBOUNCE};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

/// Runtime configuration, usually read from a TOML file.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial page size. Must be positive. Default: 5
    pub items_per_page: usize,

    /// Quiet period before search input takes effect, in milliseconds. Default: 300
    pub debounce_ms: u64,

    /// Start with the built-in 13-hero roster instead of an empty store. Default: `true`
    pub seed: bool,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,

    /// When set, spans are also exported as JSON lines to this file.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            debounce_ms: u64::try_from(SEARCH_DEBOUNCE.as_millis()).unwrap_or(300),
            seed: true,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] for malformed TOML or an
    /// `items_per_page` of zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hero_roster::Config;
    ///
    /// let config = Config::from_toml_str("items_per_page = 20")?;
    /// assert_eq!(config.items_per_page, 20);
    /// assert!(config.seed);
    /// # Ok::<(), hero_roster::RosterError>(())
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| RosterError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<()> {
        if self.items_per_page == 0 {
            return Err(RosterError::Config("items_per_page must be greater than 0".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            items_per_page: self.items_per_page,
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}

/// Builds a ready-to-use list controller from configuration.
///
/// Initializes tracing, creates the store (seeded unless `config.seed` is
/// false) and a fresh loading tracker, and uses the system clock.
///
/// # Errors
///
/// Returns [`RosterError::InvalidPageSize`] for a hand-built `Config` whose
/// `items_per_page` is zero. Configs from [`Config::from_toml_str`] are
/// already validated.
pub fn initialize(config: &Config) -> Result<ListViewController<HeroStore>> {
    observability::init_tracing(config);
    tracing::debug!(seed = config.seed, "initializing hero roster");

    let store = if config.seed {
        HeroStore::seeded()
    } else {
        HeroStore::new()
    };

    ListViewController::with_settings(
        Rc::new(store),
        Rc::new(LoadingTracker::new()),
        Rc::new(SystemClock::new()),
        config.controller_settings(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn zero_page_size_is_invalid() {
        assert!(matches!(
            Config::from_toml_str("items_per_page = 0"),
            Err(RosterError::Config(_))
        ));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        assert!(matches!(
            Config::from_toml_str("items_per_page = \"many\""),
            Err(RosterError::Config(_))
        ));
    }

    #[test]
    fn settings_follow_config() {
        let config = Config {
            items_per_page: 20,
            debounce_ms: 50,
            ..Config::default()
        };
        let settings = config.controller_settings();
        assert_eq!(settings.items_per_page, 20);
        assert_eq!(settings.debounce, Duration::from_millis(50));
    }

    #[test]
    fn unseeded_store_starts_empty() {
        let list = initialize(&Config {
            seed: false,
            ..Config::default()
        })
        .unwrap();
        assert_eq!(list.repository().hero_count(), 0);
        assert_eq!(list.pagination_state().total_pages, 1);
    }

    #[test]
    fn hand_built_zero_page_size_is_rejected() {
        let result = initialize(&Config {
            items_per_page: 0,
            ..Config::default()
        });
        assert!(matches!(result, Err(RosterError::InvalidPageSize(0))));
    }
}
