// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

use std::sync::Arc;

use jsonwebtoken::DecodingKey;
use sea_orm::Database;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use electrohub_server::api::router;
use electrohub_server::catalog::DbCatalog;
use electrohub_server::config::Config;
use electrohub_server::mailer::{HttpMailer, Mailer, NullMailer};
use electrohub_server::state::{AppState, AuthConfig};
use electrohub_server::store::{redis, RedisStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env();

    let connection = redis::connect(&config.redis_url)
        .await
        .expect("Failed to connect to the key-value store");
    let store = Arc::new(RedisStore::new(connection));

    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to the catalog database");
    let catalog = Arc::new(DbCatalog::new(db));

    let mailer: Arc<dyn Mailer> = match config.mail_relay_url {
        Some(ref url) => Arc::new(HttpMailer::new(url.clone())),
        None => {
            warn!("MAIL_RELAY_URL not set; contact emails will be dropped");
            Arc::new(NullMailer)
        }
    };

    let auth = AuthConfig {
        decoding_key: config
            .token_secret
            .as_ref()
            .map(|secret| DecodingKey::from_secret(secret.as_bytes())),
        issuer: config.token_issuer.clone(),
    };
    if auth.decoding_key.is_none() {
        warn!("TOKEN_SECRET not set; running with unverified development tokens");
    }

    let state = AppState::new(store.clone(), store, catalog, mailer)
        .with_auth(auth)
        .with_contact_daily_limit(config.contact_daily_limit);

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("ElectroHub saved-items server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
