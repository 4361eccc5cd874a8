use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;
use tracing::info;

use crate::io::project_io::{ProjectSaver, discover_project, load_project};
use crate::logging;
use crate::model::project::Project;
use crate::model::well::WellId;
use crate::nav::{NavigationBus, ViewKind, ViewLifecycleManager, ViewPolicies, ViewState, WellView};
use crate::ops::dashboard::{Dashboard, DashboardError};
use crate::views::AppView;

use super::input;
use super::render;
use super::theme::Theme;

/// Log file inside the data directory
pub const LOG_FILE: &str = "wellboard.log";

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the dashboard search box
    Search,
    /// Typing a new value for the focused Well Data field
    Edit,
}

/// Main application state
pub struct App {
    pub project_name: String,
    pub dashboard: Dashboard,
    pub bus: NavigationBus,
    pub views: Rc<RefCell<ViewLifecycleManager<AppView>>>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Text being typed in Search or Edit mode
    pub edit_buffer: String,
    /// Search text before `/` was pressed, restored on Esc
    pub search_before: String,
    /// One-shot message for the status row, cleared on the next key
    pub status_message: Option<String>,
    /// Most recent failed save, shared with the store's save hook
    pub save_error: Rc<RefCell<Option<String>>>,
}

impl App {
    pub fn new(project: Project) -> Result<Self, DashboardError> {
        let Project { config, store, .. } = project;
        let store = store.into_shared();
        let dashboard = Dashboard::builder()
            .store(store.clone())
            .card_view(config.ui.card_view)
            .build()?;

        let bus = NavigationBus::new();
        let views = ViewLifecycleManager::new(
            store,
            ViewPolicies::from_config(&config.views),
            Box::new(AppView::create),
        )
        .attach(&bus);

        Ok(App {
            project_name: config.project.name.clone(),
            dashboard,
            bus,
            views,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            edit_buffer: String::new(),
            search_before: String::new(),
            status_message: None,
            save_error: Rc::default(),
        })
    }

    pub fn view_state(&self) -> ViewState {
        self.views.borrow().state()
    }

    /// Run `f` on the displayed view. The views borrow ends before this
    /// returns, so callers may publish on the bus afterwards.
    pub fn with_current<R>(&self, f: impl FnOnce(&mut AppView) -> R) -> Option<R> {
        let mut views = self.views.borrow_mut();
        views.current_view_mut().map(f)
    }

    /// Id of the well under the dashboard cursor
    pub fn selected_well_id(&self) -> Option<WellId> {
        let cursor = match self.views.borrow().instance(ViewKind::Home) {
            Some(AppView::Home(home)) => home.cursor,
            _ => 0,
        };
        self.dashboard.visible_ids().get(cursor).copied()
    }

    /// Make `id` the active well and ask for a view of it
    pub fn open_well(&self, id: WellId, kind: ViewKind) {
        self.dashboard.store().borrow_mut().set_active(id);
        match kind {
            ViewKind::Home => self.go_home(),
            ViewKind::WellData => self.bus.request_well_data(id),
            ViewKind::Geometry => self.bus.request_geometry(id),
        }
    }

    /// Show Home with the cursor on the active well. Saving a well moves it
    /// in the projection, so the row it sat on before is no longer its row.
    pub fn go_home(&self) {
        self.bus.request_home();
        if self.view_state() != ViewState::Home {
            return;
        }
        let Some(active) = self.dashboard.store().borrow().active_id() else {
            return;
        };
        let ids = self.dashboard.visible_ids();
        self.with_current(|view| {
            if let AppView::Home(home) = view {
                home.select_id(&ids, active);
            }
        });
    }

    /// Write the displayed view's pending edits to the store
    pub fn save_current(&mut self) {
        let dirty = self
            .views
            .borrow()
            .current_view()
            .is_some_and(|v| v.has_unsaved_edits());
        self.views.borrow_mut().flush();
        self.status_message = Some(match self.save_error() {
            Some(e) => format!("Save failed: {}", e),
            None if dirty => "Saved".to_string(),
            None => "Nothing to save".to_string(),
        });
    }

    pub fn save_error(&self) -> Option<String> {
        self.save_error.borrow().clone()
    }

    /// Regex highlighting the current search text (case-insensitive, literal)
    pub fn search_re(&self) -> Option<Regex> {
        let text = self.dashboard.search_text();
        if text.trim().is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(text))).ok()
    }

    /// Flush pending edits and stop listening for navigation
    pub fn shutdown(&mut self) {
        self.views.borrow_mut().shutdown();
    }
}

/// Run the TUI application
pub fn run(project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    // Discover and load project
    let start = match project_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let root = discover_project(&start)?;
    let mut project = load_project(&root)?;
    logging::init_file(&project.data_dir.join(LOG_FILE), &project.config.log.filter)?;

    let saver = ProjectSaver::new(&project.data_dir);
    project.store.subscribe(saver.clone().into_listener());
    let mut app = App::new(project)?;
    app.save_error = saver.last_error();
    info!(project = %app.project_name, "session started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Edits still open in a view are saved on the way out
    app.shutdown();
    info!("session ended");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::config::{ProjectConfig, ReusePolicy};
    use crate::model::store::RecordStore;
    use crate::model::well::{Well, WellStatus};
    use chrono::{TimeZone, Utc};

    pub(crate) fn sample_wells() -> Vec<Well> {
        let rows = [
            (1, "Alpha 1", "Equinor", "Troll", WellStatus::Completed, 3),
            (2, "Beta 2", "Shell", "Brent", WellStatus::InProgress, 5),
            (3, "Gamma 3", "Equinor", "Sleipner", WellStatus::Draft, 1),
        ];
        rows
            .into_iter()
            .map(|(id, name, operator, field, status, day)| {
                let t = Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap();
                let mut w = Well::new_draft(id, t);
                w.name = name.into();
                w.operator = operator.into();
                w.field = field.into();
                w.status = status;
                w
            })
            .collect()
    }

    pub(crate) fn test_app(wells: Vec<Well>) -> App {
        let project = Project {
            root: PathBuf::from("/tmp/test-wellboard"),
            data_dir: PathBuf::from("/tmp/test-wellboard/wellboard"),
            config: ProjectConfig::new("Test Field"),
            store: RecordStore::from_wells(wells),
        };
        App::new(project).unwrap()
    }

    #[test]
    fn new_app_starts_on_home_and_is_attached() {
        let app = test_app(sample_wells());
        assert_eq!(app.view_state(), ViewState::Home);
        assert!(app.views.borrow().is_attached());
        assert_eq!(app.bus.listener_count(), 1);
        assert!(!app.dashboard.is_card_view());
    }

    #[test]
    fn config_drives_layout_and_policies() {
        let mut config = ProjectConfig::new("p");
        config.ui.card_view = true;
        config.views.well_data = ReusePolicy::Singleton;
        let project = Project {
            root: PathBuf::from("/tmp/p"),
            data_dir: PathBuf::from("/tmp/p/wellboard"),
            config,
            store: RecordStore::new(),
        };
        let app = App::new(project).unwrap();
        assert!(app.dashboard.is_card_view());
        assert_eq!(
            app.views.borrow().policies().policy(ViewKind::WellData),
            ReusePolicy::Singleton
        );
    }

    #[test]
    fn open_well_sets_active_and_navigates() {
        let app = test_app(sample_wells());
        app.open_well(2, ViewKind::Geometry);
        assert_eq!(app.view_state(), ViewState::Geometry(2));
        assert_eq!(app.dashboard.store().borrow().active_id(), Some(2));
    }

    #[test]
    fn selected_well_follows_projection_order() {
        let app = test_app(sample_wells());
        // default sort: last modified, newest first
        assert_eq!(app.selected_well_id(), Some(2));
        app.with_current(|v| {
            if let AppView::Home(home) = v {
                home.move_by(1, 3);
            }
        });
        assert_eq!(app.selected_well_id(), Some(1));
    }

    #[test]
    fn search_re_escapes_and_ignores_case() {
        let mut app = test_app(sample_wells());
        assert!(app.search_re().is_none());
        app.dashboard.set_search_text("a.1");
        let re = app.search_re().unwrap();
        assert!(re.is_match("A.1"));
        assert!(!re.is_match("ab1"));
    }

    #[test]
    fn shutdown_detaches_from_bus() {
        let mut app = test_app(sample_wells());
        app.shutdown();
        assert_eq!(app.bus.listener_count(), 0);
        app.bus.request_well_data(1);
        assert_eq!(app.view_state(), ViewState::Home);
    }
}
