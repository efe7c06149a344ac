//! Movie repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

use super::MovieRepository;
use crate::models::{Movie, NewMovie};

const MOVIE_COLUMNS: &str = "id, title, director, year, plot, rating, duration, release_date, \
                             created_at, updated_at, deleted_at";

/// Movie repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgMovieRepository {
    pool: PgPool,
}

impl PgMovieRepository {
    /// Create a new movie repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Wrap `query` in `%...%`, escaping LIKE metacharacters so they match literally
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn find_all(&self) -> DatabaseResult<Vec<Movie>> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE deleted_at IS NULL");

        sqlx::query_as::<_, Movie>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Movie>> {
        let sql =
            format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Movie>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn search(&self, query: &str) -> DatabaseResult<Vec<Movie>> {
        let sql = format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE deleted_at IS NULL
              AND (title LIKE $1 OR director LIKE $1 OR plot LIKE $1)
            "#
        );

        sqlx::query_as::<_, Movie>(&sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn create(&self, movie: &NewMovie) -> DatabaseResult<Movie> {
        info!("Creating movie: {}", movie.title);

        let sql = format!(
            r#"
            INSERT INTO movies (title, director, year, plot, rating, duration, release_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MOVIE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Movie>(&sql)
            .bind(&movie.title)
            .bind(&movie.director)
            .bind(movie.year)
            .bind(&movie.plot)
            .bind(movie.rating)
            .bind(movie.duration)
            .bind(movie.release_date)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn update(&self, movie: &Movie) -> DatabaseResult<Option<Movie>> {
        info!("Updating movie: {}", movie.id);

        let sql = format!(
            r#"
            UPDATE movies
            SET title = $2, director = $3, year = $4, plot = $5, rating = $6,
                duration = $7, release_date = $8, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {MOVIE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Movie>(&sql)
            .bind(movie.id)
            .bind(&movie.title)
            .bind(&movie.director)
            .bind(movie.year)
            .bind(&movie.plot)
            .bind(movie.rating)
            .bind(movie.duration)
            .bind(movie.release_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn soft_delete(&self, id: i64) -> DatabaseResult<bool> {
        info!("Soft-deleting movie: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE movies
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_plain_text() {
        assert_eq!(like_pattern("Nolan"), "%Nolan%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }
}
