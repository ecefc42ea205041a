use tracing::{error, info};

use corkboard::{BoardRepository, Config, Database, UserRepository};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = corkboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        corkboard::logging::init_console_only(&config.logging.level);
    }

    info!("Corkboard - board/list/card collaboration backend");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    let users = UserRepository::new(db.pool()).count().await;
    let boards = BoardRepository::new(db.pool()).count().await;
    match (users, boards) {
        (Ok(users), Ok(boards)) => info!(users, boards, "database ready"),
        (Err(e), _) | (_, Err(e)) => error!("Failed to read database: {e}"),
    }

    db.close().await;
}
