use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::CurrentUser;
use super::flash::{self, FlashLevel};
use super::pages::{self, PageContext};
use super::validation::validate_movie_id;
use super::{ApiError, AppState, recover_not_found};
use crate::constants::messages::{INVALID_INPUT, ITEM_CREATED, ITEM_DELETED, ITEM_UPDATED};
use crate::models::{Movie, User};
use crate::services::MovieError;

#[derive(Debug, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let movies = state.movies().list().await?;
    let ctx = PageContext::load(&state, &session, current).await?;
    Ok(pages::index(&ctx, &movies))
}

/// POST /
pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    Extension(_user): Extension<User>,
    session: Session,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, ApiError> {
    match state.movies().add(&form.title, &form.year).await {
        Ok(_) => flash::push(&session, FlashLevel::Success, ITEM_CREATED).await?,
        Err(MovieError::Validation(reason)) => {
            tracing::debug!("Rejected new movie: {reason}");
            flash::push(&session, FlashLevel::Error, INVALID_INPUT).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/"))
}

/// GET /movie/edit/{id}
pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let movie = match find_movie(&state, &id).await {
        Ok(movie) => movie,
        Err(e) => return recover_not_found(&state, &session, current, e).await,
    };

    let ctx = PageContext::load(&state, &session, current).await?;
    Ok(pages::edit_movie(&ctx, &movie).into_response())
}

async fn find_movie(state: &AppState, raw_id: &str) -> Result<Movie, ApiError> {
    let id = validate_movie_id(raw_id)?;
    Ok(state.movies().get(id).await?)
}

/// POST /movie/edit/{id}
/// Invalid input goes back to the edit form; an unknown id is a 404.
pub async fn edit_movie(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<MovieForm>,
) -> Result<Response, ApiError> {
    let id = match validate_movie_id(&id) {
        Ok(id) => id,
        Err(e) => return recover_not_found(&state, &session, current, e).await,
    };

    match state.movies().edit(id, &form.title, &form.year).await {
        Ok(_) => {
            flash::push(&session, FlashLevel::Success, ITEM_UPDATED).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(MovieError::Validation(reason)) => {
            tracing::debug!("Rejected edit of movie {id}: {reason}");
            flash::push(&session, FlashLevel::Error, INVALID_INPUT).await?;
            Ok(Redirect::to(&format!("/movie/edit/{id}")).into_response())
        }
        Err(e) => recover_not_found(&state, &session, current, e.into()).await,
    }
}

/// POST /movie/delete/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = match validate_movie_id(&id) {
        Ok(id) => id,
        Err(e) => return recover_not_found(&state, &session, current, e).await,
    };

    match state.movies().delete(id).await {
        Ok(()) => {
            flash::push(&session, FlashLevel::Success, ITEM_DELETED).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => recover_not_found(&state, &session, current, e.into()).await,
    }
}
