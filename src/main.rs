use std::sync::Arc;
use std::time::Duration;
use toneshift_backend::infrastructure::config::{Config, LogFormat};
use toneshift_backend::infrastructure::db::{check_connection, create_pool};
use toneshift_backend::infrastructure::http::start_http_server;
use toneshift_backend::infrastructure::rate_limit::DenialLimiter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting ToneShift Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    tracing::info!("Instantiating repositories...");
    let user_repo = Arc::new(
        toneshift_backend::infrastructure::repositories::UserRepository::new(pool.clone()),
    );
    let sample_repo = Arc::new(
        toneshift_backend::infrastructure::repositories::SampleRepository::new(pool.clone()),
    );

    // 2. Instantiate the denial throttle (injected, never a global)
    let denial_limiter = Arc::new(DenialLimiter::new(
        config.denial_limit,
        Duration::from_secs(config.denial_window_secs),
    ));

    // 3. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let user_service = Arc::new(toneshift_backend::domain::user::UserService::new(
        user_repo.clone(),
        sample_repo.clone(),
    ));
    let rewrite_service = Arc::new(toneshift_backend::domain::rewrite::RewriteService::new(
        user_repo.clone(),
    ));
    let sample_service = Arc::new(toneshift_backend::domain::sample::SampleService::new(
        sample_repo.clone(),
        user_repo.clone(),
    ));

    // 4. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let user_controller = Arc::new(toneshift_backend::controllers::user::UserController::new(
        user_service.clone(),
    ));
    let rewrite_controller = Arc::new(
        toneshift_backend::controllers::rewrite::RewriteController::new(
            rewrite_service,
            denial_limiter.clone(),
        ),
    );
    let sample_controller = Arc::new(
        toneshift_backend::controllers::sample::SampleController::new(sample_service),
    );

    // Start HTTP server with all routes
    start_http_server(
        pool,
        config,
        user_repo,
        user_controller,
        rewrite_controller,
        sample_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "toneshift_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "toneshift_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
