mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{Config, SwaggerConfig};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::router::{app_router, AppServices};
use crate::core::{database, middleware};
use crate::features::auth;
use crate::modules::persistence::PgStore;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?
        .block_on(serve(worker_threads))
}

async fn serve(worker_threads: usize) -> anyhow::Result<()> {
    // .env must be loaded before the subscriber reads RUST_LOG
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(worker_threads, pid = std::process::id(), "Configuration loaded");

    let pool = database::create_pool(&config.database).await?;
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database ready, migrations applied");

    let jwt_validator = Arc::new(auth::JwtValidator::new(
        Arc::new(auth::JwksClient::new(
            &config.auth.issuer,
            config.auth.jwks_cache_ttl,
        )),
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.jwt_leeway,
        config.auth.claims_namespace.clone(),
    ));
    tracing::info!(issuer = %config.auth.issuer, "Bearer token validation configured");

    let store = Arc::new(PgStore::new(pool));
    let services = AppServices::new(
        store.clone(),
        store.clone(),
        store,
        &config.site,
        config.app.enable_admin_reset,
    )
    .map_err(|e| anyhow::anyhow!("Failed to build pages: {}", e))?;

    // Bearer tokens are optional; guards reject anonymous writes
    let routes = app_router(&services).layer(from_fn_with_state(
        jwt_validator,
        middleware::auth_middleware,
    ));

    // Outermost first: request id, tracing, id propagation, CORS, body limit
    let http_layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size));

    let app = Router::new()
        .merge(swagger_router(&config.swagger))
        .merge(routes)
        .layer(http_layers);

    let addr = config.app.server_address();
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address {}: {}", addr, e))?;
    let listener = bind_listener(socket_addr)?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Swagger UI and the OpenAPI document, behind basic auth when configured
fn swagger_router(config: &SwaggerConfig) -> Router {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
    }
    .modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    match config.credentials() {
        Some(credentials) => {
            tracing::info!("Swagger UI basic auth enabled");
            swagger.layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::basic_auth_middleware,
            ))
        }
        None => {
            tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
            swagger
        }
    }
}

fn bind_listener(addr: SocketAddr) -> std::io::Result<tokio::net::TcpListener> {
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(Duration::from_secs(60));
    #[cfg(target_os = "linux")]
    let keepalive = keepalive
        .with_interval(Duration::from_secs(10))
        .with_retries(3);
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;

    tokio::net::TcpListener::from_std(socket.into())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
