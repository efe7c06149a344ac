//! In-memory repositories for exercising flows and routes without PostgreSQL

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use std::sync::Mutex;

use super::{MovieRepository, UserRepository};
use crate::models::{Movie, NewMovie, NewUser, Role, User};

#[derive(Default)]
pub struct InMemoryMovieRepository {
    movies: Mutex<Vec<Movie>>,
}

impl InMemoryMovieRepository {
    /// Every stored row, soft-deleted ones included
    pub fn rows(&self) -> Vec<Movie> {
        self.movies.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn find_all(&self) -> DatabaseResult<Vec<Movie>> {
        let movies = self.movies.lock().unwrap();
        Ok(movies.iter().filter(|m| !m.is_deleted()).cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Movie>> {
        let movies = self.movies.lock().unwrap();
        Ok(movies
            .iter()
            .find(|m| m.id == id && !m.is_deleted())
            .cloned())
    }

    async fn search(&self, query: &str) -> DatabaseResult<Vec<Movie>> {
        let movies = self.movies.lock().unwrap();
        Ok(movies
            .iter()
            .filter(|m| !m.is_deleted())
            .filter(|m| {
                m.title.contains(query) || m.director.contains(query) || m.plot.contains(query)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, movie: &NewMovie) -> DatabaseResult<Movie> {
        let mut movies = self.movies.lock().unwrap();
        let now = Utc::now();
        let stored = Movie {
            id: movies.len() as i64 + 1,
            title: movie.title.clone(),
            director: movie.director.clone(),
            year: movie.year,
            plot: movie.plot.clone(),
            rating: movie.rating,
            duration: movie.duration,
            release_date: movie.release_date,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        movies.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, movie: &Movie) -> DatabaseResult<Option<Movie>> {
        let mut movies = self.movies.lock().unwrap();
        let Some(slot) = movies
            .iter_mut()
            .find(|m| m.id == movie.id && !m.is_deleted())
        else {
            return Ok(None);
        };

        *slot = Movie {
            created_at: slot.created_at,
            updated_at: Utc::now(),
            deleted_at: None,
            ..movie.clone()
        };
        Ok(Some(slot.clone()))
    }

    async fn soft_delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut movies = self.movies.lock().unwrap();
        match movies.iter_mut().find(|m| m.id == id && !m.is_deleted()) {
            Some(movie) => {
                movie.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn rows(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn mark_deleted(&self, id: i64) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.deleted_at = Some(Utc::now());
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username == username && u.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: users.len() as i64 + 1,
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            role: new_user.role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn username_exists(&self, username: &str) -> DatabaseResult<bool> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.username == username))
    }

    async fn count_by_role(&self, role: Role) -> DatabaseResult<i64> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| u.role == role && u.deleted_at.is_none())
            .count() as i64)
    }
}
