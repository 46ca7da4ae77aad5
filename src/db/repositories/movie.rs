use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{movies, prelude::*};
use crate::models::Movie;

/// Repository for movie operations
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All movies in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let row = Movies::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie")?;

        Ok(row.map(Movie::from))
    }

    pub async fn add(&self, title: &str, year: &str) -> Result<Movie> {
        let active = movies::ActiveModel {
            title: Set(title.to_string()),
            year: Set(year.to_string()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert movie")?;

        info!("Added movie {}: {} ({})", model.id, model.title, model.year);
        Ok(Movie::from(model))
    }

    pub async fn add_many(&self, entries: &[(&str, &str)]) -> Result<u64> {
        if entries.is_empty() {
            return Ok(0);
        }

        let models = entries.iter().map(|(title, year)| movies::ActiveModel {
            title: Set((*title).to_string()),
            year: Set((*year).to_string()),
            ..Default::default()
        });

        Movies::insert_many(models)
            .exec(&self.conn)
            .await
            .context("Failed to insert movies")?;

        Ok(entries.len() as u64)
    }

    /// Returns `None` when the movie does not exist.
    pub async fn update(&self, id: i32, title: &str, year: &str) -> Result<Option<Movie>> {
        let Some(row) = Movies::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: movies::ActiveModel = row.into();
        active.title = Set(title.to_string());
        active.year = Set(year.to_string());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update movie")?;

        info!("Updated movie {}: {} ({})", model.id, model.title, model.year);
        Ok(Some(Movie::from(model)))
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Movies::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete movie")?;

        if result.rows_affected > 0 {
            info!("Deleted movie {}", id);
        }
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Movies::find()
            .count(&self.conn)
            .await
            .context("Failed to count movies")
    }
}
