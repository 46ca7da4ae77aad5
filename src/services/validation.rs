//! Field rules shared by the catalog and account services.
//!
//! Lengths count characters, not bytes. Inputs are trimmed before checking
//! and the trimmed value is what gets stored.

use crate::constants::limits::{
    MOVIE_TITLE_MAX_CHARS, MOVIE_YEAR_MAX_CHARS, USER_NAME_MAX_CHARS, USERNAME_MAX_CHARS,
};

/// Validated movie fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFields {
    pub title: String,
    pub year: String,
}

fn bounded(field: &str, value: &str, max: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }
    if trimmed.chars().count() > max {
        return Err(format!("{field} must be {max} characters or less"));
    }
    Ok(trimmed.to_string())
}

pub fn validate_movie(title: &str, year: &str) -> Result<MovieFields, String> {
    Ok(MovieFields {
        title: bounded("Title", title, MOVIE_TITLE_MAX_CHARS)?,
        year: bounded("Year", year, MOVIE_YEAR_MAX_CHARS)?,
    })
}

pub fn validate_display_name(name: &str) -> Result<String, String> {
    bounded("Name", name, USER_NAME_MAX_CHARS)
}

pub fn validate_username(username: &str) -> Result<String, String> {
    bounded("Username", username, USERNAME_MAX_CHARS)
}
