use clap::{Arg, Command}; // Import necessary modules from clap for command-line argument parsing
use log::{error, info};
use std::sync::Arc;

use greenroom::accounts::confirm::ConfirmationService;
use greenroom::accounts::password::PasswordHasher;
use greenroom::accounts::register::RegistrationService;
use greenroom::accounts::store::JsonFileAccountStore;
use greenroom::accounts::tokens::RandomTokenGenerator;
use greenroom::email::message::{LogDispatcher, NotificationDispatcher};
use greenroom::email::smtp::SmtpDispatcher;
use greenroom::http::state::{build_router, AppState};
use greenroom::utils::logging::initialize_logging;
use greenroom::venues::store::VenueStore;
use greenroom::AppConfig;

#[tokio::main]
async fn main() {
    // Initialize logging system first so startup failures are captured
    if let Err(e) = initialize_logging() {
        eprintln!("Warning: Failed to initialize logging system: {}", e);
    }

    let matches = Command::new("greenroom")
        .version("0.1.0")
        .about("Venue platform backend with account registration and e-mail confirmation")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to the JSON configuration file")
                .default_value("greenroom.json"),
        )
        .arg(
            Arg::new("bind")
                .short('b')
                .long("bind")
                .value_name("ADDR")
                .help("Listen address override, e.g. 0.0.0.0:8080"),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .cloned()
        .unwrap_or_else(|| "greenroom.json".to_string());
    let bind_override = matches.get_one::<String>("bind").cloned();

    if let Err(e) = run(&config_path, bind_override).await {
        error!("Startup failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(
    config_path: &str,
    bind_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load(config_path).await?;
    if let Some(bind) = bind_override {
        config.server.bind_addr = bind;
    }

    // Build every collaborator explicitly and wire them together here
    let store = Arc::new(JsonFileAccountStore::open(&config.storage.accounts_file).await?);
    let venues = Arc::new(VenueStore::open(&config.storage.venues_file).await?);

    let dispatcher: Arc<dyn NotificationDispatcher> = match &config.smtp {
        Some(settings) => {
            info!("Delivering notifications over SMTP via {}", settings.host);
            Arc::new(SmtpDispatcher::new(settings)?)
        }
        None => {
            info!("No SMTP settings configured, notifications will only be logged");
            Arc::new(LogDispatcher)
        }
    };

    let registration = Arc::new(RegistrationService::new(
        store.clone(),
        Arc::new(RandomTokenGenerator),
        dispatcher,
        config.server.public_origin.clone(),
    ));
    let confirmation = Arc::new(ConfirmationService::new(store, PasswordHasher::new()));

    let router = build_router(AppState {
        registration,
        confirmation,
        venues,
    });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    info!("Listening on {}", config.server.bind_addr);
    axum::serve(listener, router).await?;

    Ok(())
}
