use std::fs::File;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use serde_json::{Value, json};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use timetabler::core::action::Action;
use timetabler::core::catalog::module_code;
use timetabler::core::config::{self, ResolvedConfig};
use timetabler::core::state::CatalogStatus;
use timetabler::runtime::Runtime;
use timetabler::service::{HttpTimetableService, TimetableService};
use timetabler::tui;

const PASSWORD_ENV: &str = "TIMETABLER_PASSWORD";

#[derive(Parser)]
#[command(name = "timetabler", about = "Pick university modules and see their combined timetable")]
struct Args {
    /// Backend base URL (overrides config file and TIMETABLER_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Verbosity of timetabler.log
    #[arg(long, default_value_t = LevelFilter::Debug, global = true)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the aggregated timetable for the given modules as JSON
    Show {
        /// Catalog display strings, or bare module codes
        #[arg(required = true)]
        modules: Vec<String>,
    },
    /// Check a username/password pair against the backend
    Validate {
        username: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Before parsing so .env can supply TIMETABLER_PASSWORD
    dotenv::dotenv().ok();
    let args = Args::parse();

    // Initialize file logger - writes to timetabler.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("timetabler.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        config::TimetablerConfig::default()
    });
    let resolved = config::resolve(&file_config, args.base_url.as_deref());
    info!("Timetabler starting up against {}", resolved.base_url);

    let service: Arc<dyn TimetableService> =
        Arc::new(HttpTimetableService::from_config(&resolved).map_err(std::io::Error::other)?);

    match args.command {
        None => tui::run(Runtime::new(service), resolved.base_url.clone()),
        Some(Command::Show { modules }) => show(service, &modules).await,
        Some(Command::Validate { username, password }) => {
            validate(service.as_ref(), &resolved, &username, &password).await
        }
    }
}

/// Headless run of the same add/refresh flow the TUI drives.
async fn show(service: Arc<dyn TimetableService>, modules: &[String]) -> std::io::Result<()> {
    let mut runtime = Runtime::new(service);
    runtime.dispatch(Action::LoadCatalog);
    runtime.settle().await;

    if runtime.app().catalog_status != CatalogStatus::Ready {
        let message = runtime.app().error.clone().unwrap_or_default();
        error!("{}", message);
        return Err(std::io::Error::other(message));
    }

    for requested in modules {
        let display_name = resolve_display_name(&runtime, requested);
        runtime.dispatch(Action::AddModule(display_name));
        if let Some(message) = runtime.app().error.clone() {
            eprintln!("skipping: {}", message);
            runtime.dispatch(Action::DismissError);
        }
    }
    runtime.settle().await;

    if let Some(message) = runtime.app().error.clone() {
        return Err(std::io::Error::other(message));
    }

    let app = runtime.app();
    let rows: Vec<Value> = app
        .selection
        .list()
        .iter()
        .map(|display_name| {
            let code = module_code(display_name);
            json!({
                "module": display_name,
                "code": code,
                "timetable": app.timetable.get(code).map(|r| r.as_value().clone()),
            })
        })
        .collect();

    let pretty = serde_json::to_string_pretty(&rows).map_err(std::io::Error::other)?;
    println!("{}", pretty);
    Ok(())
}

/// A bare code is expanded to its catalog entry; anything else passes through.
fn resolve_display_name(runtime: &Runtime, requested: &str) -> String {
    let catalog = &runtime.app().catalog;
    if catalog.contains(requested) {
        return requested.to_string();
    }
    catalog
        .entries()
        .iter()
        .find(|entry| module_code(entry) == requested)
        .cloned()
        .unwrap_or_else(|| requested.to_string())
}

async fn validate(
    service: &dyn TimetableService,
    config: &ResolvedConfig,
    username: &str,
    password: &str,
) -> std::io::Result<()> {
    info!("Validating credentials for {} against {}", username, config.base_url);
    let valid = service
        .validate_credentials(username, password)
        .await
        .map_err(std::io::Error::other)?;
    println!("{}", valid);
    Ok(())
}
