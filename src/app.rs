use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use handlebars::Handlebars;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, Environment};
use crate::database::LeadRepository;
use crate::handlers;
use crate::middleware::{route_guard, RouteGuard};
use crate::templates;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub leads: Arc<dyn LeadRepository>,
    pub templates: Arc<Handlebars<'static>>,
    pub guard: Arc<RouteGuard>,
}

impl AppState {
    pub fn new(config: AppConfig, leads: Arc<dyn LeadRepository>) -> anyhow::Result<Self> {
        let guard = RouteGuard::from_config(&config.security);
        Ok(Self {
            config: Arc::new(config),
            leads,
            templates: Arc::new(templates::registry()?),
            guard: Arc::new(guard),
        })
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let guard = state.guard.clone();

    Router::new()
        .route("/health", get(handlers::public::health))
        // Public pages
        .merge(page_routes())
        // API (exempt from the guard)
        .merge(api_routes())
        // Protected dashboard
        .merge(dashboard_routes())
        .with_state(state)
        // Global middleware
        .layer(from_fn_with_state(guard, route_guard))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn page_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/login", get(public::login_page).post(public::login_form))
        .route("/logout", get(public::logout))
}

fn api_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::api;

    Router::new()
        .route("/api/login", post(api::login))
        .route("/api/leads", get(api::leads))
}

fn dashboard_routes() -> Router<AppState> {
    use handlers::protected;

    Router::new()
        .route("/dashboard", get(protected::dashboard))
        .route("/dashboard/export", get(protected::export))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
