//! Movie model and its request/response payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

/// Movie entity as stored in the `movies` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub plot: String,
    pub rating: f32,
    /// Running time in minutes
    pub duration: i32,
    pub release_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Movie {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A validated movie ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub year: i32,
    pub plot: String,
    pub rating: f32,
    pub duration: i32,
    pub release_date: Option<NaiveDate>,
}

/// Request body for creating a movie
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateMovieRequest {
    #[validate(
        required(message = "This field is required"),
        length(min = 1, message = "This field is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "This field is required"),
        length(min = 1, message = "This field is required")
    )]
    pub director: Option<String>,
    #[validate(
        required(message = "This field is required"),
        range(min = 1800, max = 2100, message = "Must be between 1800 and 2100")
    )]
    pub year: Option<i32>,
    pub plot: Option<String>,
    #[validate(range(min = 0.0, max = 10.0, message = "Must be between 0 and 10"))]
    pub rating: Option<f32>,
    #[validate(
        required(message = "This field is required"),
        range(min = 1, message = "Must be at least 1")
    )]
    pub duration: Option<i32>,
    pub release_date: Option<NaiveDate>,
}

impl CreateMovieRequest {
    /// Validate the request and turn it into an insertable movie
    pub fn into_new_movie(self) -> Result<NewMovie, ValidationErrors> {
        self.validate()?;

        Ok(NewMovie {
            title: self.title.unwrap_or_default(),
            director: self.director.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            plot: self.plot.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
            duration: self.duration.unwrap_or_default(),
            release_date: self.release_date,
        })
    }
}

/// Request body for a partial movie update
///
/// A field counts as provided only when it is present and not its zero
/// value: `""` for text, `0` for numbers. There is no way to clear a field
/// back to empty or zero through an update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub director: Option<String>,
    #[validate(range(min = 1800, max = 2100, message = "Must be between 1800 and 2100"))]
    pub year: Option<i32>,
    pub plot: Option<String>,
    #[validate(range(min = 0.0, max = 10.0, message = "Must be between 0 and 10"))]
    pub rating: Option<f32>,
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub duration: Option<i32>,
    pub release_date: Option<NaiveDate>,
}

impl UpdateMovieRequest {
    /// Drop every field that holds its zero value
    pub fn provided(self) -> Self {
        Self {
            title: self.title.filter(|s| !s.is_empty()),
            director: self.director.filter(|s| !s.is_empty()),
            year: self.year.filter(|&y| y != 0),
            plot: self.plot.filter(|s| !s.is_empty()),
            rating: self.rating.filter(|&r| r != 0.0),
            duration: self.duration.filter(|&d| d != 0),
            release_date: self.release_date,
        }
    }

    /// Overwrite the fields of `movie` that this request carries
    pub fn apply_to(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(director) = self.director {
            movie.director = director;
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(plot) = self.plot {
            movie.plot = plot;
        }
        if let Some(rating) = self.rating {
            movie.rating = rating;
        }
        if let Some(duration) = self.duration {
            movie.duration = duration;
        }
        if let Some(release_date) = self.release_date {
            movie.release_date = Some(release_date);
        }
    }
}

/// Movie as returned to API clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub plot: String,
    pub rating: f32,
    pub duration: i32,
    pub release_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            director: movie.director,
            year: movie.year,
            plot: movie.plot,
            rating: movie.rating,
            duration: movie.duration,
            release_date: movie.release_date,
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}
