//! NOUREL order API server.
//!
//! Serves the checkout API used by the storefront (port 3000 by default).
//!
//! # Architecture
//!
//! - Axum web framework, JSON only
//! - In-memory order store (orders are lost on restart)
//! - Askama templates for the notification emails
//! - SMTP delivery via lettre

#![cfg_attr(not(test), forbid(unsafe_code))]

use nourel_api::{AppState, app, config::ApiConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Start Sentry when `SENTRY_DSN` is set. The guard flushes pending events on drop.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        server_name: Some(format!("{}-api", config.shop.name.to_lowercase()).into()),
        environment: config.sentry_environment.clone().map(Into::into),
        sample_rate: config.sentry_sample_rate,
        traces_sample_rate: config.sentry_traces_sample_rate,
        attach_stacktrace: true,
        ..Default::default()
    };
    let guard = sentry::init((dsn, options));

    tracing::info!(shop = %config.shop.name, "Sentry initialized");
    Some(guard)
}

/// Warnings and errors become Sentry events; info and debug ride along as
/// breadcrumbs on the next event.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
        _ => sentry_tracing::EventFilter::Breadcrumb,
    }
}

#[tokio::main]
async fn main() {
    // Sentry needs the DSN before any subscriber exists
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nourel_api=info,tower_http=debug".into());

    let json_layer = config
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!config.json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let state = AppState::from_config(&config).expect("Failed to configure SMTP transport");
    tracing::info!(
        smtp_host = %config.email.smtp_host,
        from = %config.email.from_address,
        seller = %config.seller_email,
        "Email configured"
    );

    let app = app(state)
        // Hub per request, then a transaction per route
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("{} API listening on http://{}", config.shop.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve on Ctrl+C or SIGTERM. `axum::serve` then lets in-flight
/// payment confirmations finish sending their emails before exiting.
async fn shutdown_signal() {
    let signal = tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                tracing::error!(error = %err, "Ctrl+C handler unavailable");
                std::future::pending::<()>().await;
            }
            "SIGINT"
        }
        () = terminate() => "SIGTERM",
    };

    tracing::info!(signal, "Shutdown requested, draining open requests");
}

#[cfg(unix)]
async fn terminate() {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            tracing::error!(error = %err, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
