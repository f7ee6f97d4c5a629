use futures_util::future::{self, FutureExt, LocalBoxFuture};
use hero_roster::app::{
    CrudMode, DeleteOutcome, Field, ListViewController, ManualClock, SubmitOutcome,
};
use hero_roster::storage::{HeroRepository, HeroStore};
use hero_roster::{Hero, LoadingTracker, Result, RosterError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// In-memory store whose writes can be switched to fail.
#[derive(Default)]
struct FlakyRepository {
    inner: HeroStore,
    failing: Cell<bool>,
    writes: Cell<usize>,
}

impl FlakyRepository {
    fn seeded() -> Self {
        Self {
            inner: HeroStore::seeded(),
            ..Self::default()
        }
    }

    fn offline<T: 'static>(&self) -> Option<LocalBoxFuture<'_, Result<T>>> {
        self.writes.set(self.writes.get() + 1);
        self.failing.get().then(|| {
            let error = RosterError::Repository("backend offline".to_string());
            future::ready(Err(error)).boxed_local()
        })
    }
}

impl HeroRepository for FlakyRepository {
    fn heroes(&self) -> Rc<[Hero]> {
        self.inner.list()
    }

    fn search_heroes(&self, term: &str) -> Rc<[Hero]> {
        self.inner.search(term)
    }

    fn revision(&self) -> u64 {
        self.inner.revision()
    }

    fn create_hero(&self, hero: Hero) -> LocalBoxFuture<'_, Result<Hero>> {
        self.offline().unwrap_or_else(|| self.inner.create_hero(hero))
    }

    fn update_hero(&self, hero: Hero) -> LocalBoxFuture<'_, Result<()>> {
        self.offline().unwrap_or_else(|| self.inner.update_hero(hero))
    }

    fn delete_hero(&self, id: String) -> LocalBoxFuture<'_, Result<()>> {
        self.offline().unwrap_or_else(|| self.inner.delete_hero(id))
    }
}

fn flaky_list() -> ListViewController<FlakyRepository> {
    let repository = FlakyRepository::seeded();
    repository.failing.set(true);
    ListViewController::new(
        Rc::new(repository),
        Rc::new(LoadingTracker::new()),
        Rc::new(ManualClock::new()),
    )
}

fn fill_valid(list: &mut ListViewController<FlakyRepository>) {
    list.set_field(Field::Name, "Cyborg");
    list.set_field(Field::Superpower, "Technopathy");
    list.set_field(Field::City, "Detroit");
}

#[test]
fn failed_create_keeps_form_open_with_message() {
    let mut list = flaky_list();
    list.show_add_form();
    fill_valid(&mut list);

    assert_eq!(pollster::block_on(list.submit()), SubmitOutcome::Failed);
    assert_eq!(list.error(), Some("Error creating hero."));
    assert_eq!(list.mode(), CrudMode::Adding);
    assert_eq!(list.hero_form().value(Field::Name), "Cyborg");
    assert_eq!(list.loading().count(), 0);
    assert_eq!(list.repository().heroes().len(), 13);

    list.repository().failing.set(false);
    assert!(matches!(pollster::block_on(list.submit()), SubmitOutcome::Saved(_)));
    assert_eq!(list.error(), None);
    assert_eq!(list.repository().heroes().len(), 14);
}

#[test]
fn failed_update_keeps_edit_form() {
    let mut list = flaky_list();
    let batman = list.repository().heroes()[2].clone();
    list.show_edit_form(&batman);
    list.set_field(Field::City, "Bludhaven");

    assert_eq!(pollster::block_on(list.submit()), SubmitOutcome::Failed);
    assert_eq!(list.error(), Some("Error updating hero."));
    assert_eq!(list.mode(), CrudMode::Editing("3".to_string()));
    assert_eq!(list.repository().heroes()[2].city, "Gotham");
}

#[test]
fn failed_delete_keeps_confirmation_open() {
    let mut list = flaky_list();
    let hulk = list.repository().heroes()[7].clone();
    list.confirm_delete(&hulk);

    assert_eq!(pollster::block_on(list.delete_confirmed()), DeleteOutcome::Failed);
    assert_eq!(list.error(), Some("Error deleting hero."));
    assert!(list.state().is_confirming_delete());
    assert_eq!(list.repository().heroes().len(), 13);

    list.clear_error();
    assert_eq!(list.error(), None);
}

#[test]
fn invalid_form_never_reaches_repository() {
    let mut list = flaky_list();
    list.show_add_form();

    assert_eq!(pollster::block_on(list.submit()), SubmitOutcome::Invalid);
    assert_eq!(list.repository().writes.get(), 0);
    assert_eq!(list.error(), None);
}

#[test]
fn busy_tracker_refuses_overlapping_writes() {
    let mut list = flaky_list();
    list.repository().failing.set(false);
    list.show_add_form();
    fill_valid(&mut list);

    list.loading().start();
    assert_eq!(pollster::block_on(list.submit()), SubmitOutcome::Busy);
    assert_eq!(list.repository().writes.get(), 0);
    assert_eq!(list.mode(), CrudMode::Adding);
    list.loading().stop();

    assert!(matches!(pollster::block_on(list.submit()), SubmitOutcome::Saved(_)));
}

#[test]
fn loading_flag_brackets_each_write() {
    let mut list = flaky_list();
    let transitions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&transitions);
    list.loading().subscribe(move |state| sink.borrow_mut().push(state.is_busy()));

    let hero = list.repository().heroes()[0].clone();
    list.confirm_delete(&hero);
    pollster::block_on(list.delete_confirmed());

    list.repository().failing.set(false);
    pollster::block_on(list.delete_confirmed());

    assert_eq!(*transitions.borrow(), vec![true, false, true, false]);
    assert!(!list.state().is_confirming_delete());
}
