use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use frntx_api::{
    config::Config,
    handlers::send_message,
    middleware::logging,
    routes::{assistants, clients, files, health, merchants, models, threads},
    state::AppState,
};
use frntx_assistants::{AssistantsApi, HostedAssistantsClient};
use frntx_chat::{CoordinatorConfig, RunCoordinator};
use frntx_persist::{MirrorStore, MongoMirrorStore};
use frntx_storage::{HttpObjectStore, ObjectStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting FRNT X API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    let assistants_api: Arc<dyn AssistantsApi> =
        Arc::new(HostedAssistantsClient::new(config.openai_api_key.clone())?);

    let coordinator = RunCoordinator::new(assistants_api.clone()).with_config(CoordinatorConfig {
        poll_interval: Duration::from_millis(config.chat.poll_interval_ms),
        max_polls: config.chat.max_polls,
        fail_on_unsuccessful_run: config.chat.fail_on_unsuccessful_run,
    });

    tracing::info!("Connecting to MongoDB");
    let mirror: Arc<dyn MirrorStore> = Arc::new(
        MongoMirrorStore::connect(&config.mongodb_uri, &config.mongodb.database).await?,
    );
    tracing::info!("MongoDB connected");

    let objects: Arc<dyn ObjectStore> = Arc::new(HttpObjectStore::new(
        config.storage.url.clone(),
        &config.storage_service_key,
    )?);

    let state = Arc::new(AppState::new(
        config.clone(),
        assistants_api,
        coordinator,
        mirror,
        objects,
    ));

    let app = build_router(state.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Chat
        .route("/send-message", post(send_message::send_message))
        // Hosted files
        .route("/files/:file_id", get(files::download_file))
        .route("/upload-file", post(files::upload_file))
        // Merchants
        .route(
            "/merchants",
            get(merchants::list_merchants).post(merchants::create_merchant),
        )
        .route(
            "/merchants/:merchant_id",
            get(merchants::get_merchant)
                .put(merchants::update_merchant)
                .delete(merchants::delete_merchant),
        )
        .route(
            "/merchants/:merchant_id/files",
            get(merchants::list_merchant_files)
                .put(merchants::replace_merchant_files)
                .post(merchants::upload_merchant_file),
        )
        .route(
            "/merchants/:merchant_id/files/:file_id",
            delete(merchants::delete_merchant_file),
        )
        // Assistants
        .route(
            "/assistants",
            get(assistants::list_assistants).post(assistants::create_assistant),
        )
        .route(
            "/assistants/:assistant_id",
            get(assistants::get_assistant)
                .patch(assistants::update_assistant)
                .delete(assistants::delete_assistant),
        )
        .route(
            "/assistants/:assistant_id/files",
            get(assistants::list_assistant_files),
        )
        .route(
            "/assistants/:assistant_id/files/:file_id",
            delete(assistants::delete_assistant_file),
        )
        // Threads
        .route(
            "/assistants/:assistant_id/threads",
            get(threads::list_threads).post(threads::create_thread),
        )
        .route("/threads/:thread_id", delete(threads::delete_thread))
        .route("/threads/:thread_id/messages", get(threads::list_messages))
        // Clients
        .route("/clients", get(clients::list_clients))
        .route("/clients/:client_id", get(clients::get_client))
        // Models
        .route("/models", get(models::list_models));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(Duration::from_secs(300))) // streaming runs are slow
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::PATCH,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            for origin in &config.cors.origins {
                if let Ok(parsed_origin) = origin.parse::<axum::http::HeaderValue>() {
                    cors = cors.allow_origin(parsed_origin);
                }
            }
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
