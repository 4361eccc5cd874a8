//! End-to-end tests of a dashboard session: a project on disk, its record
//! store, the dashboard projection, and navigation through the bus.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

use wellboard::io::project_io::{self, ProjectSaver};
use wellboard::model::store::{RecordStore, SharedStore};
use wellboard::model::well::{HoleSection, Well, WellStatus};
use wellboard::nav::{NavigationBus, ViewLifecycleManager, ViewPolicies, ViewState, WellView};
use wellboard::ops::dashboard::Dashboard;
use wellboard::ops::search::SortKey;
use wellboard::views::{AppView, WellDataField};

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
}

fn well(id: u32, name: &str, modified_day: u32) -> Well {
    let mut w = Well::new_draft(id, at(1));
    w.name = name.into();
    w.last_modified = at(modified_day);
    w
}

type Views = Rc<RefCell<ViewLifecycleManager<AppView>>>;

fn session(store: &SharedStore) -> (NavigationBus, Views) {
    let bus = NavigationBus::new();
    let views = ViewLifecycleManager::new(
        store.clone(),
        ViewPolicies::default(),
        Box::new(AppView::create),
    )
    .attach(&bus);
    (bus, views)
}

fn geometry_of(views: &Views) -> Vec<HoleSection> {
    match views.borrow().current_view() {
        Some(AppView::Geometry(g)) => g.sections().to_vec(),
        other => panic!("expected geometry view, got {:?}", other),
    }
}

#[test]
fn search_narrows_projection_but_not_statistics() {
    let store = RecordStore::from_wells(vec![well(1, "Alpha", 2), well(2, "Beta", 3)]).into_shared();
    let mut dashboard = Dashboard::new(store);

    assert_eq!(dashboard.sort_key(), SortKey::LastModifiedNewest);
    let names: Vec<String> = dashboard.visible_wells().into_iter().map(|w| w.name).collect();
    assert_eq!(names, vec!["Beta", "Alpha"]);

    dashboard.set_search_text("alp");
    let names: Vec<String> = dashboard.visible_wells().into_iter().map(|w| w.name).collect();
    assert_eq!(names, vec!["Alpha"]);
    assert_eq!(dashboard.stats().total, 2);
}

#[test]
fn geometry_to_geometry_saves_outgoing_well_first() {
    let mut first = well(1, "Alpha", 2);
    first.geometry = vec![HoleSection {
        name: "Surface".into(),
        top_md: 0.0,
        bottom_md: 400.0,
    }];
    let store = RecordStore::from_wells(vec![first, well(2, "Beta", 3)]).into_shared();

    // Record the store's view of well 1 at the moment well 2 is first shown
    let seen_when_second_loaded: Rc<RefCell<Option<usize>>> = Rc::default();
    let (bus, views) = session(&store);
    {
        let seen = seen_when_second_loaded.clone();
        let observer = store.clone();
        let watcher = views.clone();
        bus.subscribe(move |_| {
            if let Ok(views) = watcher.try_borrow()
                && views.state() == ViewState::Geometry(2)
                && seen.borrow().is_none()
            {
                let sections = observer.borrow().get(1).map(|w| w.geometry.len());
                *seen.borrow_mut() = sections;
            }
        });
    }

    bus.request_geometry(1);
    if let Some(AppView::Geometry(g)) = views.borrow_mut().current_view_mut() {
        g.add_section();
    }
    assert!(views.borrow().current_view().unwrap().has_unsaved_edits());

    bus.request_geometry(2);
    assert_eq!(views.borrow().state(), ViewState::Geometry(2));
    assert_eq!(*seen_when_second_loaded.borrow(), Some(2));
    assert!(geometry_of(&views).is_empty());

    let saved = store.borrow().get(1).unwrap().clone();
    assert_eq!(saved.geometry.len(), 2);
    assert_eq!(saved.geometry[1].top_md, 400.0);
    assert!(saved.last_modified > at(2));
}

#[test]
fn saves_reach_disk_and_reload() {
    let tmp = tempfile::TempDir::new().unwrap();
    project_io::init_project(tmp.path(), "Flow Test").unwrap();
    let project = project_io::load_project(tmp.path()).unwrap();

    let saver = ProjectSaver::new(&project.data_dir);
    let mut store = project.store;
    store.subscribe(saver.clone().into_listener());
    let store = store.into_shared();
    let dashboard = Dashboard::new(store.clone());
    let (bus, views) = session(&store);

    let id = dashboard.create_new_well().unwrap();
    assert_eq!(store.borrow().active_id(), Some(id));
    bus.request_well_data(id);
    if let Some(AppView::WellData(form)) = views.borrow_mut().current_view_mut() {
        form.set_field(WellDataField::Name, "Troll B-4").unwrap();
        form.set_field(WellDataField::Operator, "Equinor").unwrap();
        form.cycle_status();
    }

    // Leaving the form flushes it
    bus.request_home();
    assert_eq!(views.borrow().state(), ViewState::Home);
    assert!(saver.last_error().borrow().is_none());

    let reloaded = project_io::load_project(tmp.path()).unwrap();
    let stored = reloaded.store.get(id).unwrap();
    assert_eq!(stored.name, "Troll B-4");
    assert_eq!(stored.operator, "Equinor");
    assert_eq!(stored.status, WellStatus::InProgress);

    let stats = Dashboard::new(reloaded.store.into_shared()).stats();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.distinct_operators, 1);
}

#[test]
fn navigation_to_removed_well_is_ignored() {
    let store = RecordStore::from_wells(vec![well(1, "Alpha", 2), well(2, "Beta", 3)]).into_shared();
    let dashboard = Dashboard::new(store.clone());
    let (bus, views) = session(&store);

    bus.request_well_data(1);
    assert!(dashboard.remove_well(2).is_some());
    bus.request_geometry(2);

    assert_eq!(views.borrow().state(), ViewState::WellData(1));
    assert_eq!(dashboard.visible_count(), 1);
}

#[test]
fn shutdown_flushes_and_stops_listening() {
    let store = RecordStore::from_wells(vec![well(1, "Alpha", 2)]).into_shared();
    let (bus, views) = session(&store);

    bus.request_geometry(1);
    if let Some(AppView::Geometry(g)) = views.borrow_mut().current_view_mut() {
        g.add_section();
    }
    views.borrow_mut().shutdown();

    assert_eq!(store.borrow().get(1).unwrap().geometry.len(), 1);
    assert_eq!(bus.listener_count(), 0);

    bus.request_home();
    assert_eq!(views.borrow().state(), ViewState::Geometry(1));
}
