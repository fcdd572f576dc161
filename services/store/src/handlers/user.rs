use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use furniture_core::extract::{IdPath, QueryParams, ValidatedJson};
use furniture_domain::address::Address;
use furniture_domain::media::ImageRef;
use furniture_domain::pagination::PageRequest;
use furniture_domain::user::UserRole;

use crate::domain::types::{User, UserFilter};
use crate::error::StoreServiceError;
use crate::handlers::validation;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Option<UserRole>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(custom(function = "validation::phone_number"))]
    pub phone_number: Option<String>,
    #[validate(nested)]
    pub avatar: Option<ImageRef>,
    #[validate(nested)]
    pub address: Option<Address>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(custom(function = "validation::phone_number"))]
    pub phone_number: Option<String>,
    #[validate(nested)]
    pub avatar: Option<ImageRef>,
    #[validate(nested)]
    pub address: Option<Address>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub avatar: Option<ImageRef>,
    pub address: Option<Address>,
    pub is_active: bool,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms_opt")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            avatar: user.avatar,
            address: user.address,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub per_page: Option<i64>,
    pub page: Option<i64>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub q: Option<String>,
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UserListQuery>,
) -> Result<Json<Vec<UserResponse>>, StoreServiceError> {
    let uc = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let filter = UserFilter {
        role: query.role,
        is_active: query.is_active,
        q: query.q,
    };
    let users = uc
        .execute(filter, PageRequest::from_query(query.per_page, query.page))
        .await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<UserResponse>, StoreServiceError> {
    let uc = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), StoreServiceError> {
    let uc = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = uc
        .execute(CreateUserInput {
            email: body.email,
            password: body.password,
            role: body.role,
            first_name: body.first_name,
            last_name: body.last_name,
            phone_number: body.phone_number,
            avatar: body.avatar,
            address: body.address,
            is_active: body.is_active,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── PATCH /users/{id} ────────────────────────────────────────────────────────

pub async fn update_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, StoreServiceError> {
    let uc = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = uc
        .execute(
            id,
            UpdateUserInput {
                email: body.email,
                password: body.password,
                role: body.role,
                first_name: body.first_name,
                last_name: body.last_name,
                phone_number: body.phone_number,
                avatar: body.avatar,
                address: body.address,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, StoreServiceError> {
    let uc = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
