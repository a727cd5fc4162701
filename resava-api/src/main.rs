use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use resava_api::{app, state::SubmissionRegistry, AppState};
use resava_core::capabilities::{self, NoopAnalytics, StaticPlacesLookup};
use resava_crm::HttpCrmClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resava_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = resava_api::config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Resava API on port {}", config.server.port);

    let crm = HttpCrmClient::new(
        &config.crm.base_url,
        &config.crm.token,
        Duration::from_secs(config.crm.timeout_seconds),
    )
    .expect("Failed to build CRM client");

    let places = Arc::new(StaticPlacesLookup::new(config.places.known_places.clone()));

    // Wait once for the lookup backend, bounded; the widget degrades to
    // plain text input if it never comes up.
    let readiness_timeout = Duration::from_secs(config.places.readiness_timeout_seconds);
    if let Err(error) = capabilities::await_ready(places.as_ref(), readiness_timeout).await {
        tracing::warn!(%error, "places lookup unavailable, continuing without it");
    }

    let app_state = AppState {
        crm: Arc::new(crm),
        places,
        analytics: Arc::new(NoopAnalytics),
        catalog: Arc::new(resava_catalog::seed_catalog()),
        whatsapp_phone: config.whatsapp.phone_number.clone(),
        submissions: Arc::new(SubmissionRegistry::default()),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
