// src/bin/init_db.rs

use std::process::ExitCode;

use quiz_backend::config::Config;
use quiz_backend::seed;
use quiz_backend::store::SqliteQuestionStore;
use tracing_subscriber::EnvFilter;

/// Resets the question bank to the bundled sample questions.
#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.rust_log))
        .with_target(false)
        .init();

    tracing::info!("Initializing database...");
    let store = match SqliteQuestionStore::connect(&config.database_url).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Error initializing database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = seed::reset_with_samples(&store).await;
    store.close().await;

    match outcome {
        Ok(count) => {
            tracing::info!("Database initialized successfully");
            tracing::info!("Inserted {} questions", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Error initializing database: {}", e);
            ExitCode::FAILURE
        }
    }
}
