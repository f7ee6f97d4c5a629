//! In-memory hero store.
//!
//! [`HeroStore`] owns the authoritative, ordered hero sequence for the lifetime
//! of the process. Every effective mutation replaces the snapshot, bumps the
//! revision, and republishes the new snapshot synchronously to all subscribers
//! before returning.
//!
//! # Characteristics
//!
//! - **Read**: O(1) snapshot clone (`Rc<[Hero]>`), O(n) lookup by id
//! - **Write**: O(n) copy-on-write of the sequence
//! - **Persistence**: none; the store is recreated on load

use crate::domain::error::{Result, RosterError};
use crate::domain::Hero;
use crate::storage::backend::HeroRepository;
use crate::storage::feed::{Feed, SubscriptionId};
use crate::storage::search::{matches_term, normalize_term};
use crate::storage::seed::seed_heroes;
use futures_util::future::{self, FutureExt, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use ulid::Ulid;

/// Ordered, in-memory hero store with a snapshot feed.
///
/// # Thread Safety
///
/// Neither `Send` nor `Sync`: the store lives on the single UI event loop and is
/// shared through `Rc`.
///
/// # Examples
///
/// ```
/// use hero_roster::storage::HeroStore;
/// use hero_roster::Hero;
///
/// let store = HeroStore::seeded();
/// assert_eq!(store.hero_count(), 13);
///
/// let created = store.create(Hero::new("Storm", "Weather", "Harlem"))?;
/// assert_eq!(store.list().last(), Some(&created));
/// # Ok::<(), hero_roster::RosterError>(())
/// ```
pub struct HeroStore {
    heroes: RefCell<Rc<[Hero]>>,
    revision: Cell<u64>,
    snapshots: Feed<Rc<[Hero]>>,
}

impl HeroStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_heroes(Vec::new())
    }

    /// Creates a store holding the 13 seed heroes.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_heroes(seed_heroes())
    }

    /// Creates a store holding `heroes` in order.
    ///
    /// Ids stay unique: a hero with an empty id, or with an id already used by
    /// an earlier entry, is given a freshly generated id.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hero_roster::storage::HeroStore;
    /// use hero_roster::Hero;
    ///
    /// let store = HeroStore::with_heroes(vec![
    ///     Hero::new("Hulk", "Super strength", "Dayton").with_id("8"),
    ///     Hero::new("She-Hulk", "Super strength", "Los Angeles").with_id("8"),
    /// ]);
    /// let heroes = store.list();
    /// assert_eq!(heroes[0].id, "8");
    /// assert_ne!(heroes[1].id, "8");
    /// ```
    #[must_use]
    pub fn with_heroes(mut heroes: Vec<Hero>) -> Self {
        tracing::debug!(count = heroes.len(), "initializing hero store");

        let reserved: HashSet<String> = heroes
            .iter()
            .filter(|hero| hero.has_id())
            .map(|hero| hero.id.clone())
            .collect();
        let mut taken = HashSet::with_capacity(heroes.len());
        for hero in &mut heroes {
            if !hero.has_id() || taken.contains(&hero.id) {
                let previous = std::mem::take(&mut hero.id);
                hero.id = fresh_id(|id| reserved.contains(id) || taken.contains(id));
                tracing::warn!(
                    previous = %previous,
                    id = %hero.id,
                    "re-identified hero with missing or duplicate id"
                );
            }
            taken.insert(hero.id.clone());
        }

        Self {
            heroes: RefCell::new(heroes.into()),
            revision: Cell::new(0),
            snapshots: Feed::new(),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn list(&self) -> Rc<[Hero]> {
        Rc::clone(&self.heroes.borrow())
    }

    #[must_use]
    pub fn hero_count(&self) -> usize {
        self.heroes.borrow().len()
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Looks a hero up by id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Hero> {
        self.heroes.borrow().iter().find(|hero| hero.id == id).cloned()
    }

    /// Appends a hero, generating an id if `hero.id` is empty.
    ///
    /// # Returns
    ///
    /// The stored hero, carrying its final id.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::DuplicateId`] (and publishes nothing) when
    /// `hero.id` is already used by a live hero.
    pub fn create(&self, mut hero: Hero) -> Result<Hero> {
        let _span = tracing::debug_span!("store_create", has_id = hero.has_id()).entered();

        if !hero.has_id() {
            hero.id = fresh_id(|id| self.contains_id(id));
        } else if self.contains_id(&hero.id) {
            tracing::debug!(id = %hero.id, "id already taken, create rejected");
            return Err(RosterError::DuplicateId(hero.id));
        }

        let mut next = self.heroes.borrow().to_vec();
        next.push(hero.clone());
        self.replace(next);

        tracing::debug!(id = %hero.id, "hero created");
        Ok(hero)
    }

    /// Replaces the hero with the same id, keeping its position.
    ///
    /// Returns `false` (and publishes nothing) when no hero has that id.
    pub fn update(&self, hero: Hero) -> bool {
        let _span = tracing::debug_span!("store_update", id = %hero.id).entered();

        let current = self.list();
        let Some(index) = current.iter().position(|existing| existing.id == hero.id) else {
            tracing::debug!("hero not found, update ignored");
            return false;
        };

        let mut next = current.to_vec();
        next[index] = hero;
        self.replace(next);
        true
    }

    /// Removes the hero with `id`.
    ///
    /// Returns `false` (and publishes nothing) when no hero has that id.
    pub fn delete(&self, id: &str) -> bool {
        let _span = tracing::debug_span!("store_delete", id = %id).entered();

        let current = self.list();
        if !current.iter().any(|hero| hero.id == id) {
            tracing::debug!("hero not found, delete ignored");
            return false;
        }

        let next: Vec<Hero> = current.iter().filter(|hero| hero.id != id).cloned().collect();
        self.replace(next);
        true
    }

    /// Returns heroes matching `term` in their original relative order.
    ///
    /// A blank term returns the full snapshot unchanged.
    #[must_use]
    pub fn search(&self, term: &str) -> Rc<[Hero]> {
        let Some(term) = normalize_term(term) else {
            return self.list();
        };

        let _span = tracing::debug_span!("store_search", term = %term).entered();
        let matches: Rc<[Hero]> = self
            .heroes
            .borrow()
            .iter()
            .filter(|hero| matches_term(hero, &term))
            .cloned()
            .collect();

        tracing::debug!(matched = matches.len(), "search complete");
        matches
    }

    /// Registers a listener invoked with every new snapshot.
    pub fn subscribe(&self, listener: impl Fn(&Rc<[Hero]>) + 'static) -> SubscriptionId {
        self.snapshots.subscribe(listener)
    }

    /// Removes a listener added with [`subscribe`](Self::subscribe).
    ///
    /// Returns `false` if `id` was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.snapshots.unsubscribe(id)
    }

    fn replace(&self, heroes: Vec<Hero>) {
        let snapshot: Rc<[Hero]> = heroes.into();
        *self.heroes.borrow_mut() = Rc::clone(&snapshot);
        self.revision.set(self.revision.get() + 1);

        tracing::trace!(
            revision = self.revision.get(),
            count = snapshot.len(),
            "publishing snapshot"
        );
        self.snapshots.publish(&snapshot);
    }

    fn contains_id(&self, id: &str) -> bool {
        self.heroes.borrow().iter().any(|hero| hero.id == id)
    }
}

/// Generates a lowercase ULID not rejected by `taken`.
fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = Ulid::new().to_string().to_lowercase();
        if !taken(&id) {
            return id;
        }
    }
}

impl Default for HeroStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HeroStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroStore")
            .field("heroes", &self.hero_count())
            .field("revision", &self.revision.get())
            .field("snapshots", &self.snapshots)
            .finish()
    }
}

impl HeroRepository for HeroStore {
    fn heroes(&self) -> Rc<[Hero]> {
        self.list()
    }

    fn search_heroes(&self, term: &str) -> Rc<[Hero]> {
        self.search(term)
    }

    fn revision(&self) -> u64 {
        Self::revision(self)
    }

    fn create_hero(&self, hero: Hero) -> LocalBoxFuture<'_, Result<Hero>> {
        future::ready(self.create(hero)).boxed_local()
    }

    fn update_hero(&self, hero: Hero) -> LocalBoxFuture<'_, Result<()>> {
        self.update(hero);
        future::ready(Ok(())).boxed_local()
    }

    fn delete_hero(&self, id: String) -> LocalBoxFuture<'_, Result<()>> {
        self.delete(&id);
        future::ready(Ok(())).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn trio() -> HeroStore {
        HeroStore::with_heroes(vec![
            Hero::new("Spider-Man", "Web-slinging", "New York")
                .with_id("1")
                .with_alter_ego("Peter Parker"),
            Hero::new("Superman", "Flight", "Metropolis")
                .with_id("2")
                .with_alter_ego("Clark Kent"),
            Hero::new("Batman", "Intelligence", "Gotham")
                .with_id("3")
                .with_alter_ego("Bruce Wayne"),
        ])
    }

    fn names(heroes: &[Hero]) -> Vec<&str> {
        heroes.iter().map(|hero| hero.name.as_str()).collect()
    }

    #[test]
    fn seeded_store_keeps_duplicates() {
        let store = HeroStore::seeded();
        let lanterns = store
            .list()
            .iter()
            .filter(|hero| hero.name == "The Green Lantern")
            .count();

        assert_eq!(store.hero_count(), 13);
        assert_eq!(lanterns, 3);
    }

    #[test]
    fn create_generates_unique_id_when_empty() {
        let store = trio();
        let first = store.create(Hero::new("Hulk", "Super strength", "Dayton")).unwrap();
        let second = store.create(Hero::new("Hulk", "Super strength", "Dayton")).unwrap();

        assert!(first.has_id());
        assert_ne!(first.id, second.id);
        assert_eq!(store.hero_count(), 5);
        assert_eq!(store.list()[3], first);
    }

    #[test]
    fn create_preserves_given_id() {
        let store = trio();
        let created = store
            .create(Hero::new("Thor", "Thunder", "Asgard").with_id("thor"))
            .unwrap();

        assert_eq!(created.id, "thor");
        assert_eq!(store.get_by_id("thor"), Some(created));
    }

    #[test]
    fn create_rejects_taken_id() {
        let store = HeroStore::seeded();
        let impostor = Hero::new("Spider-Woman", "Venom blast", "New York").with_id("1");

        assert!(matches!(store.create(impostor), Err(RosterError::DuplicateId(id)) if id == "1"));
        assert_eq!(store.hero_count(), 13);
        assert_eq!(store.revision(), 0);

        assert!(store.delete("1"));
        assert_eq!(store.hero_count(), 12);
        assert!(store.get_by_id("1").is_none());
    }

    #[test]
    fn initial_duplicates_are_reidentified() {
        let store = HeroStore::with_heroes(vec![
            Hero::new("Batman", "Intelligence", "Gotham").with_id("3"),
            Hero::new("Robin", "Acrobatics", "Gotham").with_id("3"),
            Hero::new("Alfred", "Butlering", "Gotham"),
        ]);
        let ids: HashSet<String> = store.list().iter().map(|hero| hero.id.clone()).collect();

        assert_eq!(ids.len(), 3);
        assert_eq!(store.get_by_id("3").map(|hero| hero.name), Some("Batman".to_string()));
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn update_replaces_in_place() {
        let store = trio();
        let renamed = Hero::new("Superman Prime", "Flight", "Metropolis").with_id("2");

        assert!(store.update(renamed.clone()));
        assert_eq!(store.list()[1], renamed);
        assert_eq!(names(&store.list()), ["Spider-Man", "Superman Prime", "Batman"]);
    }

    #[test]
    fn update_of_missing_id_leaves_store_unchanged() {
        let store = trio();
        let before = store.list();

        assert!(!store.update(Hero::new("Ghost", "None", "Nowhere").with_id("404")));
        assert_eq!(store.list(), before);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn delete_of_missing_id_leaves_store_unchanged() {
        let store = trio();
        let before = store.list();

        assert!(!store.delete("404"));
        assert_eq!(store.list(), before);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn delete_removes_only_matching_hero() {
        let store = trio();
        assert!(store.delete("2"));
        assert_eq!(names(&store.list()), ["Spider-Man", "Batman"]);
    }

    #[test]
    fn search_matches_substrings_case_insensitively() {
        let store = trio();

        assert_eq!(names(&store.search("man")), ["Spider-Man", "Superman", "Batman"]);
        assert_eq!(names(&store.search("GOTHAM")), ["Batman"]);
        assert_eq!(names(&store.search("  kent ")), ["Superman"]);
        assert!(store.search("aquaman").is_empty());
    }

    #[test]
    fn blank_search_returns_full_snapshot() {
        let store = trio();
        assert_eq!(store.search(""), store.list());
        assert_eq!(store.search("   "), store.list());
    }

    #[test]
    fn subscribers_observe_every_mutation_in_order() {
        let store = trio();
        let counts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&counts);
        store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.len()));

        store.create(Hero::new("Hulk", "Super strength", "Dayton")).unwrap();
        store.create(Hero::new("Impostor", "Mimicry", "Nowhere").with_id("2")).unwrap_err();
        store.delete("1");
        store.delete("missing");
        store.update(Hero::new("Batman", "Detective", "Gotham").with_id("3"));

        assert_eq!(*counts.borrow(), vec![4, 3, 3]);
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn repository_mutations_resolve_immediately() {
        let store = trio();
        let created = pollster::block_on(
            store.create_hero(Hero::new("Flash", "Speed", "Central City")),
        )
        .unwrap();

        pollster::block_on(store.delete_hero(created.id.clone())).unwrap();
        pollster::block_on(store.update_hero(Hero::new("X", "Yyy", "Z").with_id("404"))).unwrap();

        assert_eq!(store.hero_count(), 3);
    }

    fn arb_hero() -> impl Strategy<Value = Hero> {
        let text = "[a-cA-C -]{0,6}";
        (text, text, text, prop::option::of(text)).prop_map(|(name, power, city, alter)| {
            let hero = Hero::new(name, power, city);
            match alter {
                Some(alter_ego) => hero.with_alter_ego(alter_ego),
                None => hero,
            }
        })
    }

    fn naive_matches(hero: &Hero, raw: &str) -> bool {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&hero.name, &hero.superpower, &hero.city]
            .into_iter()
            .chain(hero.alter_ego.as_ref())
            .any(|field| field.to_lowercase().contains(&needle))
    }

    proptest! {
        #[test]
        fn search_agrees_with_lowercase_contains(
            heroes in prop::collection::vec(arb_hero(), 0..12),
            raw in "[a-cA-C -]{0,3}",
        ) {
            let store = HeroStore::with_heroes(heroes);
            let expected: Vec<Hero> = store
                .list()
                .iter()
                .filter(|hero| naive_matches(hero, &raw))
                .cloned()
                .collect();

            prop_assert_eq!(store.search(&raw).to_vec(), expected);
        }
    }
}
