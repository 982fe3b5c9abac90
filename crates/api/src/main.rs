use api::{build_app, build_app_state, init_auth_services, load_site_content};
use config::{ApiConfig, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be populated
    let _ = dotenvy::dotenv();

    // Load configuration first to get logging settings
    let config = ApiConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Application cannot start without a valid configuration.");
        std::process::exit(1);
    });

    init_tracing(&config.logging);

    let auth_components = init_auth_services(&config)?;
    let content = load_site_content(&config.content);
    let state = build_app_state(&config, &auth_components, content);
    let app = build_app(state);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::info!(address = %bind_address, "Server started successfully");
    tracing::info!(
        "Cookies: secure={}, root domain={}",
        config.auth.secure_cookies,
        config.auth.root_domain
    );
    tracing::info!("OAuth Endpoints:");
    tracing::info!("  - GET /auth/start (Redirect to X OAuth)");
    tracing::info!("  - GET /auth/callback (OAuth callback)");
    tracing::info!("  - GET /auth/logout (Logout)");
    tracing::info!("  - GET /auth/user (Current user info)");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(logging_config: &LoggingConfig) {
    // Build the filter string from the logging configuration
    let mut filter = logging_config.level.clone();

    for (module, level) in &logging_config.modules {
        filter.push_str(&format!(",{}={}", module, level));
    }

    // Initialize tracing based on the format specified in config
    match logging_config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .init();
        }
    }
}
