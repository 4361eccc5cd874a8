mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

/// Global override for project directory (set by -C flag)
static PROJECT_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::project_io::{self, ProjectError, ProjectSaver};
use crate::logging;
use crate::model::project::Project;
use crate::model::well::WellId;
use crate::ops::dashboard::Dashboard;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_project_cwd()
    if let Some(ref dir) = cli.project_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        PROJECT_DIR_OVERRIDE
            .lock()
            .map_err(|_| "project directory override poisoned")?
            .replace(abs);
    }

    match cli.command {
        None => Err("no subcommand given (run `wb` without arguments for the dashboard)".into()),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before project discovery
            Commands::Init(args) => cmd_init(args, cli.project_dir.as_deref()),

            // Read commands
            Commands::List(args) => cmd_list(args, json),
            Commands::Stats => cmd_stats(json),
            Commands::Show(args) => cmd_show(args, json),

            // Write commands
            Commands::New => cmd_new(json),
            Commands::Rm(args) => cmd_rm(args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_project_cwd() -> Result<Project, ProjectError> {
    let override_dir = PROJECT_DIR_OVERRIDE.lock().ok().and_then(|dir| dir.clone());
    let start = match override_dir {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(ProjectError::IoError)?,
    };
    let root = project_io::discover_project(&start)?;
    let project = project_io::load_project(&root)?;
    logging::init_stderr(&project.config.log.filter);
    Ok(project)
}

/// Wrap the project's store in a dashboard that saves on every mutation.
/// Returns the dashboard and the slot the saver reports failures into.
fn saving_dashboard(project: Project) -> (Dashboard, ProjectSaver) {
    let saver = ProjectSaver::new(&project.data_dir);
    let mut store = project.store;
    store.subscribe(saver.clone().into_listener());
    (Dashboard::new(store.into_shared()), saver)
}

fn check_saved(saver: &ProjectSaver) -> Result<(), Box<dyn std::error::Error>> {
    match saver.last_error().borrow().as_ref() {
        Some(e) => Err(format!("changes were not saved: {}", e).into()),
        None => Ok(()),
    }
}

fn not_found(id: WellId) -> Box<dyn std::error::Error> {
    format!("well not found: {}", id).into()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd()?;
    let mut dashboard = Dashboard::new(project.store.into_shared());
    if let Some(search) = args.search {
        dashboard.set_search_text(search);
    }
    dashboard.set_sort_key(args.sort);
    let wells = dashboard.visible_wells();

    if json {
        let out = WellListJson {
            search: dashboard.search_text().to_string(),
            sort: dashboard.sort_key().slug().to_string(),
            wells: wells.iter().map(well_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if wells.is_empty() {
        println!("No wells found.");
    } else {
        for well in &wells {
            println!("{}", format_well_line(well));
        }
    }
    Ok(())
}

fn cmd_stats(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd()?;
    let name = project.name().to_string();
    let dashboard = Dashboard::new(project.store.into_shared());
    let stats = dashboard.stats();

    if json {
        let out = StatsJson {
            project: name,
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", name);
        println!("{}", format_stats(&stats));
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd()?;
    let well = project.store.get(args.id).ok_or_else(|| not_found(args.id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&well_to_json(well))?);
    } else {
        for line in format_well_detail(well) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_new(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd()?;
    let (dashboard, saver) = saving_dashboard(project);
    let id = dashboard.create_new_well()?;
    check_saved(&saver)?;

    let name = dashboard
        .store()
        .borrow()
        .get(id)
        .map(|w| w.name.clone())
        .unwrap_or_default();
    if json {
        println!("{}", serde_json::to_string_pretty(&CreatedJson { id, name })?);
    } else {
        println!("Created well {}: {}", id, name);
    }
    Ok(())
}

fn cmd_rm(args: RmArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd()?;
    let (dashboard, saver) = saving_dashboard(project);
    // Removing an absent id is a no-op, not an error
    let removed = dashboard.remove_well(args.id);
    check_saved(&saver)?;

    if json {
        let out = removed.as_ref().map(well_to_json);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match removed {
            Some(well) => println!("Removed well {}: {}", well.id, well.name),
            None => println!("No well with id {}; nothing removed.", args.id),
        }
    }
    Ok(())
}
