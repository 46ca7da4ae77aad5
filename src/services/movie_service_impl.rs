//! `SeaORM` implementation of the `MovieService` trait.

use crate::db::Store;
use crate::models::Movie;
use crate::services::movie_service::{MovieError, MovieService};
use crate::services::validation::validate_movie;
use async_trait::async_trait;

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.store.list_movies().await?)
    }

    async fn get(&self, id: i32) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn add(&self, title: &str, year: &str) -> Result<Movie, MovieError> {
        let fields = validate_movie(title, year).map_err(MovieError::Validation)?;
        Ok(self.store.add_movie(&fields.title, &fields.year).await?)
    }

    async fn edit(&self, id: i32, title: &str, year: &str) -> Result<Movie, MovieError> {
        if self.store.get_movie(id).await?.is_none() {
            return Err(MovieError::NotFound(id));
        }

        let fields = validate_movie(title, year).map_err(MovieError::Validation)?;

        // The row can vanish between the check and the update.
        self.store
            .update_movie(id, &fields.title, &fields.year)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        if self.store.remove_movie(id).await? {
            Ok(())
        } else {
            Err(MovieError::NotFound(id))
        }
    }
}
