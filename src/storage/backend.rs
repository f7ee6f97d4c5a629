//! Repository abstraction between the list controller and the hero store.
//!
//! Reads are synchronous and infallible: they always reflect the latest snapshot.
//! Mutations return futures because a backend may need to suspend, and they
//! return [`Result`] because a backend may fail. The in-memory [`HeroStore`]
//! resolves immediately and never fails.
//!
//! [`HeroStore`]: crate::storage::HeroStore

use crate::domain::error::Result;
use crate::domain::Hero;
use futures_util::future::LocalBoxFuture;
use std::rc::Rc;

/// Abstraction over hero storage backends.
///
/// # Implementations
///
/// - [`HeroStore`](crate::storage::HeroStore): in-memory, process-lifetime store (default)
///
/// # Examples
///
/// ```
/// use hero_roster::storage::{HeroRepository, HeroStore};
/// use hero_roster::Hero;
///
/// let store = HeroStore::new();
/// let hulk = Hero::new("Hulk", "Super strength", "Dayton");
/// let created = pollster::block_on(store.create_hero(hulk))?;
/// assert!(created.has_id());
/// assert_eq!(store.heroes().len(), 1);
/// # Ok::<(), hero_roster::RosterError>(())
/// ```
pub trait HeroRepository {
    /// Returns the current full snapshot in insertion order.
    fn heroes(&self) -> Rc<[Hero]>;

    /// Returns the heroes matching `term`; the full snapshot for a blank term.
    fn search_heroes(&self, term: &str) -> Rc<[Hero]>;

    /// Monotonic counter that changes whenever the snapshot is republished.
    ///
    /// Lets derived views detect staleness without comparing snapshots.
    fn revision(&self) -> u64;

    /// Creates a hero, assigning an id when `hero.id` is empty.
    ///
    /// Resolves to the stored hero.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the write.
    fn create_hero(&self, hero: Hero) -> LocalBoxFuture<'_, Result<Hero>>;

    /// Replaces the hero with the same id. A missing id is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails the write.
    fn update_hero(&self, hero: Hero) -> LocalBoxFuture<'_, Result<()>>;

    /// Removes the hero with the given id. A missing id is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails the write.
    fn delete_hero(&self, id: String) -> LocalBoxFuture<'_, Result<()>>;
}
