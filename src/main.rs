use std::net::SocketAddr;

use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

use eventdesk::config::Config;
use eventdesk::database::schema;
use eventdesk::ticket::TicketConfig;
use eventdesk::web::{self, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eventdesk=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await
        .expect("could not open the registration database");

    schema::init_db(&pool)
        .await
        .expect("schema initialization failed");

    let state = AppState {
        pool,
        tickets: TicketConfig {
            base_url: config.base_url.clone(),
            default_prefix: config.ticket_prefix.clone(),
        },
    };

    // Live responses must never be cached by kiosk browsers.
    let app = web::router(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("invalid HOST/PORT");

    // Fall back one port when the configured one is taken.
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            warn!(%addr, error = %e, "bind failed, trying the next port");
            let fallback: SocketAddr = format!("{}:{}", config.host, config.port + 1)
                .parse()
                .expect("invalid fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("could not bind fallback port")
        }
    };

    let bound = listener.local_addr().expect("listener has no local address");
    info!("eventdesk serving on http://{}", bound);

    axum::serve(listener, app).await.expect("server exited");
}
