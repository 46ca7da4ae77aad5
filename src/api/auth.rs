use axum::{
    Extension, Form,
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::flash::{self, FlashLevel};
use super::pages::{self, PageContext};
use super::{ApiError, AppState};
use crate::constants::messages::{LOGGED_OUT, LOGIN_FAILED, LOGIN_REQUIRED, LOGIN_SUCCESS};
use crate::constants::session::USER_ID_KEY;
use crate::models::User;
use crate::services::AuthError;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// The user resolved from the session for this request, if any.
/// Attached to every request by [`resolve_user`].
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the session's user once per request and stores it in the request
/// extensions as [`CurrentUser`]. Unreadable sessions and ids that no longer
/// exist are treated as anonymous.
pub async fn resolve_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = match session.get::<i32>(USER_ID_KEY).await {
        Ok(Some(user_id)) => state.auth().current_user(user_id).await?,
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Session error: {e}");
            None
        }
    };

    if let Some(user) = &user {
        tracing::Span::current().record("user_id", user.id);
    }

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Route guard: anonymous callers are redirected to the login page and the
/// handler never runs. Logged-in callers get their [`User`] as an extension.
pub async fn require_login(
    Extension(current): Extension<CurrentUser>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(user) = current.0 else {
        tracing::debug!(path = %request.uri().path(), "Anonymous request to guarded route");
        flash::push(&session, FlashLevel::Error, LOGIN_REQUIRED).await?;
        return Ok(Redirect::to("/login").into_response());
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let ctx = PageContext::load(&state, &session, current).await?;
    Ok(pages::login(&ctx))
}

/// POST /login
/// Binds the session to the user on success; the session id is rotated.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, ApiError> {
    match state
        .auth()
        .login(form.username.trim(), &form.password)
        .await
    {
        Ok(user) => {
            session.cycle_id().await?;
            session.insert(USER_ID_KEY, user.id).await?;
            flash::push(&session, FlashLevel::Success, LOGIN_SUCCESS).await?;
            Ok(Redirect::to("/"))
        }
        Err(AuthError::InvalidCredentials) => {
            flash::push(&session, FlashLevel::Error, LOGIN_FAILED).await?;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(session: Session) -> Result<Redirect, ApiError> {
    session.remove::<i32>(USER_ID_KEY).await?;
    session.cycle_id().await?;
    flash::push(&session, FlashLevel::Info, LOGGED_OUT).await?;
    Ok(Redirect::to("/"))
}
