use super::ApiError;

/// Parses a movie id path segment. Anything that is not a positive `i32`
/// cannot name a row, so it is reported as a missing movie.
pub fn validate_movie_id(raw: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        // Ids are autoincrement, so anything below 1 cannot exist.
        Ok(id) if id > 0 => Ok(id),
        Ok(id) => Err(ApiError::movie_not_found(id)),
        Err(_) => Err(ApiError::NotFound(format!("Movie {raw} not found"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_movie_id() {
        assert_eq!(validate_movie_id("1").unwrap(), 1);
        assert_eq!(validate_movie_id("12345").unwrap(), 12345);
        assert!(matches!(validate_movie_id("0"), Err(ApiError::NotFound(_))));
        assert!(matches!(validate_movie_id("-1"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_validate_movie_id_rejects_malformed() {
        for raw in ["abc", "", "1.5", "99999999999"] {
            assert!(
                matches!(validate_movie_id(raw), Err(ApiError::NotFound(_))),
                "{raw:?} was accepted"
            );
        }
    }
}
