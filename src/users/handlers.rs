use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::{
    db,
    error::RepoError,
    state::AppState,
    users::{
        dto::{
            check_password, validate_changes, CreateUserRequest, EmailQuery, HealthResponse,
            Pagination, PasswordRequest, VerifyPasswordRequest, VerifyPasswordResponse,
        },
        model::{UpdateOutcome, User, UserChanges},
    },
};

type ApiResult<T> = Result<T, Response>;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route("/users/by-email", get(get_user_by_email))
        .route("/users/verify-password", post(verify_password))
        .route("/users/by-username/:username", delete(delete_user_by_username))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/:id/password", put(update_password))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

fn bad_request(msg: String) -> Response {
    warn!(message = %msg, "invalid request");
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
}

fn not_found() -> Response {
    RepoError::NotFound.into_response()
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    payload.validate().map_err(bad_request)?;
    let user = state
        .users
        .create(payload.as_new_user())
        .await
        .map_err(IntoResponse::into_response)?;
    info!(user_id = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<User>>> {
    let users = state
        .users
        .list_users(p.limit, p.offset)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<User>> {
    let user = state
        .users
        .get_by_id(id)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(q): Query<EmailQuery>,
) -> ApiResult<Json<User>> {
    match state.users.get_by_email(q.email.trim()).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(e.into_response()),
    }
}

#[instrument(skip(state, changes))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut changes): Json<UserChanges>,
) -> ApiResult<Response> {
    validate_changes(&mut changes).map_err(bad_request)?;
    let outcome = state
        .users
        .update(id, &changes)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(match outcome {
        UpdateOutcome::Updated(user) => Json(user).into_response(),
        UpdateOutcome::Noop => StatusCode::NO_CONTENT.into_response(),
    })
}

#[instrument(skip(state, payload))]
pub async fn update_password(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PasswordRequest>,
) -> ApiResult<StatusCode> {
    check_password(&payload.password).map_err(bad_request)?;
    let changed = state
        .users
        .update_password(id, &payload.password)
        .await
        .map_err(IntoResponse::into_response)?;
    if changed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

#[instrument(skip(state))]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let removed = state
        .users
        .delete(id)
        .await
        .map_err(IntoResponse::into_response)?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

#[instrument(skip(state))]
pub async fn delete_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<StatusCode> {
    let removed = state
        .users
        .delete_by_username(&username)
        .await
        .map_err(IntoResponse::into_response)?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

#[instrument(skip(state, payload))]
pub async fn verify_password(
    State(state): State<AppState>,
    Json(payload): Json<VerifyPasswordRequest>,
) -> ApiResult<Json<VerifyPasswordResponse>> {
    let valid = state
        .users
        .verify_password(payload.username.trim(), &payload.password)
        .await
        .map_err(IntoResponse::into_response)?;
    if !valid {
        warn!(username = %payload.username.trim(), "password check failed");
    }
    Ok(Json(VerifyPasswordResponse { valid }))
}

/// Reports store connectivity and the PostgreSQL server version.
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Response {
    match db::server_version(&state.db).await {
        Ok(version) => Json(HealthResponse {
            status: "ok",
            database: version,
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "database unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    database: "unreachable".into(),
                }),
            )
                .into_response()
        }
    }
}
