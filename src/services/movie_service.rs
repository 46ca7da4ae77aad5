//! Domain service for the movie catalog.

use thiserror::Error;

use crate::models::Movie;

/// Errors specific to catalog operations.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Store errors that wrap a `DbErr` (directly or under `.context`) are
/// reported as database failures.
impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        if err.downcast_ref::<sea_orm::DbErr>().is_some() {
            Self::Database(format!("{err:#}"))
        } else {
            Self::Internal(err.to_string())
        }
    }
}

/// Domain service trait for movies.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Lists all movies in insertion order.
    async fn list(&self) -> Result<Vec<Movie>, MovieError>;

    /// Gets a movie by id.
    async fn get(&self, id: i32) -> Result<Movie, MovieError>;

    /// Validates and stores a new movie.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Validation`] if title or year is missing or too long.
    async fn add(&self, title: &str, year: &str) -> Result<Movie, MovieError>;

    /// Replaces title and year of an existing movie.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] before any validation if `id` is unknown.
    async fn edit(&self, id: i32, title: &str, year: &str) -> Result<Movie, MovieError>;

    /// Removes a movie.
    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_store_errors_are_classified() {
        let db: anyhow::Result<()> = Err(sea_orm::DbErr::Custom("database is locked".into()))
            .context("Failed to list movies");
        let err = MovieError::from(db.unwrap_err());
        assert!(matches!(err, MovieError::Database(ref msg) if msg.contains("database is locked")));

        let other = MovieError::from(anyhow::anyhow!("task panicked"));
        assert!(matches!(other, MovieError::Internal(_)));
    }
}
