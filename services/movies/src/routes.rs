//! Movies service routes

use axum::{
    Extension, Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{Method, StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use validator::Validate;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, RoleGate, auth_middleware, require_role},
    models::{
        CreateMovieRequest, LoginRequest, MovieResponse, Role, TokenResponse, UpdateMovieRequest,
    },
    state::AppState,
    validation::field_errors,
};

const ADMIN_ONLY: RoleGate = RoleGate::new(&[Role::Admin]);

/// Query string of the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// Create the router for the movies service
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/movies", post(create_movie))
        .route("/movies/:id", put(update_movie).delete(delete_movie))
        .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_role));

    let movie_routes = Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/search", get(search_movies))
        .route("/movies/:id", get(get_movie))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api = Router::new()
        .route("/authApi/login", post(login))
        .merge(movie_routes);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Parse a path id, which must be a positive integer
fn parse_id(raw: &str) -> ApiResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::BadRequest("invalid ID format".to_string())),
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "movies"
    }))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    payload
        .validate()
        .map_err(|e| ApiError::Validation(field_errors(&e)))?;

    info!("Login attempt for user: {}", payload.username);

    let token = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// List every movie
pub async fn list_movies(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let movies = state.movie_service.list_all().await?;
    Ok(Json(
        movies.into_iter().map(MovieResponse::from).collect::<Vec<_>>(),
    ))
}

/// Get a movie by ID
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let movie = state.movie_service.get_by_id(id).await?;
    Ok(Json(MovieResponse::from(movie)))
}

/// Search movies by title, director or plot
pub async fn search_movies(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(params) = params?;
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("search query is required".to_string()))?;

    let movies = state.movie_service.search(&query).await?;
    Ok(Json(
        movies.into_iter().map(MovieResponse::from).collect::<Vec<_>>(),
    ))
}

/// Create a movie
pub async fn create_movie(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let movie = state.movie_service.create(payload).await?;

    info!("Movie {} created by {}", movie.id, user.username);
    Ok((StatusCode::CREATED, Json(MovieResponse::from(movie))))
}

/// Update a movie with the fields present in the body
pub async fn update_movie(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let movie = state.movie_service.update(id, payload).await?;

    info!("Movie {} updated by {}", movie.id, user.username);
    Ok(Json(MovieResponse::from(movie)))
}

/// Soft-delete a movie
pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    state.movie_service.delete(id).await?;

    info!("Movie {} deleted by {}", id, user.username);
    Ok(StatusCode::NO_CONTENT)
}
