//! Movie business operations

use std::sync::Arc;
use tracing::info;
use validator::{Validate, ValidationErrors};

use super::{ServiceError, ServiceResult};
use crate::{
    models::{CreateMovieRequest, Movie, UpdateMovieRequest},
    repositories::MovieRepository,
    validation::field_errors,
};

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(field_errors(&errors))
    }
}

#[derive(Clone)]
pub struct MovieService {
    movies: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self { movies }
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<Movie>> {
        Ok(self.movies.find_all().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Movie> {
        self.movies
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("movie"))
    }

    pub async fn search(&self, query: &str) -> ServiceResult<Vec<Movie>> {
        Ok(self.movies.search(query).await?)
    }

    pub async fn create(&self, request: CreateMovieRequest) -> ServiceResult<Movie> {
        let new_movie = request.into_new_movie()?;
        let movie = self.movies.create(&new_movie).await?;

        info!("Created movie {}: {}", movie.id, movie.title);
        Ok(movie)
    }

    /// Merge the provided fields of `request` over the stored movie
    pub async fn update(&self, id: i64, request: UpdateMovieRequest) -> ServiceResult<Movie> {
        let request = request.provided();
        request.validate()?;

        let mut movie = self.get_by_id(id).await?;
        request.apply_to(&mut movie);

        let movie = self
            .movies
            .update(&movie)
            .await?
            .ok_or(ServiceError::NotFound("movie"))?;

        info!("Updated movie {}", movie.id);
        Ok(movie)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.movies.soft_delete(id).await? {
            return Err(ServiceError::NotFound("movie"));
        }

        info!("Deleted movie {}", id);
        Ok(())
    }
}
