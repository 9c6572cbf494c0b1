pub mod handlers;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use state::AppState;

/// Start the HTTP gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) {
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                port, port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Gateway listening on http://{}", addr);
    println!("🏦 Account API: /api/v1/account/{{account_number}}/*");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}

/// Build the application router. Split out so tests can drive the routes
/// without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    let account_routes = Router::new()
        .route("/{account_number}/history", get(handlers::get_history))
        .route("/{account_number}/deposit", post(handlers::deposit))
        .route("/{account_number}/withdraw", post(handlers::withdraw))
        .route("/{account_number}/transfer", post(handlers::transfer))
        .route("/{account_number}/targets", get(handlers::get_targets));

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .nest("/api/v1/account", account_routes)
        .with_state(state)
}
