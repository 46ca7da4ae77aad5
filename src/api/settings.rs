use axum::{
    Extension, Form,
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::CurrentUser;
use super::flash::{self, FlashLevel};
use super::pages::{self, PageContext};
use super::{ApiError, AppState};
use crate::constants::messages::{INVALID_INPUT, SETTINGS_UPDATED};
use crate::models::User;
use crate::services::AuthError;

#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub name: String,
}

/// GET /settings
pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Extension(user): Extension<User>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let ctx = PageContext::load(&state, &session, current).await?;
    Ok(pages::settings(&ctx, &user.name))
}

/// POST /settings
/// Always renames the session's own user.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    session: Session,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, ApiError> {
    match state.auth().update_name(user.id, &form.name).await {
        Ok(_) => {
            flash::push(&session, FlashLevel::Success, SETTINGS_UPDATED).await?;
            Ok(Redirect::to("/"))
        }
        Err(AuthError::Validation(reason)) => {
            tracing::debug!("Rejected settings update: {reason}");
            flash::push(&session, FlashLevel::Error, INVALID_INPUT).await?;
            Ok(Redirect::to("/settings"))
        }
        Err(e) => Err(e.into()),
    }
}
