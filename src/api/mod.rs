use axum::{
    Extension, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use tracing::warn;

use crate::config::{Config, ServerConfig};
use crate::constants::session::COOKIE_NAME;
use crate::services::{AuthService, MovieService};
use crate::state::SharedState;

pub mod auth;
mod error;
pub mod flash;
mod movies;
mod observability;
pub mod pages;
mod settings;
mod validation;

pub use auth::CurrentUser;
pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn movies(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

fn session_key(server: &ServerConfig) -> anyhow::Result<Key> {
    match &server.secret_key {
        Some(secret) => Key::try_from(secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid session secret key: {e}")),
        None => {
            warn!("No secret key configured; generated a random one, sessions end on restart");
            Ok(Key::generate())
        }
    }
}

pub fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let server = &state.config().server;

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(COOKIE_NAME)
        .with_secure(server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_expiry_minutes,
        )))
        .with_signed(session_key(server)?);

    let protected_routes = create_protected_router();

    Ok(Router::new()
        .route("/", get(movies::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .merge(protected_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::resolve_user,
        ))
        .layer(session_layer)
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(movies::add_movie))
        .route("/logout", get(auth::logout))
        .route(
            "/movie/edit/{id}",
            get(movies::edit_page).post(movies::edit_movie),
        )
        .route("/movie/delete/{id}", post(movies::delete_movie))
        .route(
            "/settings",
            get(settings::settings_page).post(settings::update_settings),
        )
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::require_login))
}

async fn not_found(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
) -> Result<Response, ApiError> {
    not_found_page(&state, &session, current).await
}

/// The 404 page rendered with the visitor's own page context.
async fn not_found_page(
    state: &AppState,
    session: &Session,
    current: CurrentUser,
) -> Result<Response, ApiError> {
    let ctx = pages::PageContext::load(state, session, current).await?;
    Ok((StatusCode::NOT_FOUND, pages::not_found(&ctx)).into_response())
}

/// Turns a `NotFound` raised by a handler into the contextual 404 page.
/// Any other error is passed through unchanged.
async fn recover_not_found(
    state: &AppState,
    session: &Session,
    current: CurrentUser,
    err: ApiError,
) -> Result<Response, ApiError> {
    match err {
        ApiError::NotFound(reason) => {
            tracing::debug!("{reason}");
            not_found_page(state, session, current).await
        }
        other => Err(other),
    }
}
