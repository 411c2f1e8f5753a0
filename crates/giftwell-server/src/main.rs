use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use giftwell_api::auth::{self, AppState, AppStateInner};
use giftwell_api::middleware::require_auth;
use giftwell_api::{friends, gifts, lists};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "giftwell=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("GIFTWELL_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("GIFTWELL_DB_PATH").unwrap_or_else(|_| "giftwell.db".into());
    let host = std::env::var("GIFTWELL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("GIFTWELL_PORT")
        .unwrap_or_else(|_| "8081".into())
        .parse()?;

    // Init database
    let db = Arc::new(giftwell_db::Database::open(&PathBuf::from(&db_path))?);

    // Shared state
    let state: AppState = Arc::new(AppStateInner::new(db, jwt_secret));

    // Routes
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/lists/{user_id}", get(lists::get_lists))
        .route("/list", post(lists::create_list))
        .route("/list/{list_id}", post(lists::edit_list).delete(lists::remove_list))
        .route("/list/{list_id}/gift", post(gifts::create_gift))
        .route(
            "/list/{list_id}/gift/{gift_id}",
            post(gifts::edit_gift).delete(gifts::remove_gift),
        )
        .route("/list/{list_id}/gift/{gift_id}/claim", post(gifts::claim_gift))
        .route("/friends", get(friends::get_friends))
        .route("/friend", post(friends::request_friend))
        .route("/friend/accept/{friend_id}", post(friends::accept_friend))
        .route("/friend/reject/{friend_id}", post(friends::reject_friend))
        .route("/friend/{friend_id}", delete(friends::remove_friend))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Giftwell server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
