use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use zsanitize::Whitelist;
use zsanitize_api::{router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let whitelist = match std::env::var("ZSANITIZE_WHITELIST") {
        Ok(path) => match Whitelist::from_path(&path) {
            Ok(whitelist) => whitelist,
            Err(err) => {
                error!("failed to load whitelist {path}: {err}");
                return;
            }
        },
        Err(_) => {
            warn!("ZSANITIZE_WHITELIST not set, every element will be rejected");
            Whitelist::new()
        }
    };
    info!(elements = whitelist.len(), "whitelist ready");

    let app = router(AppState::new(whitelist));

    let host = std::env::var("ZSANITIZE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("ZSANITIZE_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{host}:{port}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            return;
        }
    };
    info!("listening on {addr}");

    if let Err(err) = axum::serve(listener, app).await {
        error!("server error: {err}");
    }
}
