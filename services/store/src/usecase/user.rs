use tracing::info;

use furniture_domain::address::Address;
use furniture_domain::media::ImageRef;
use furniture_domain::pagination::PageRequest;
use furniture_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User, UserFilter};
use crate::error::StoreServiceError;
use crate::usecase::password::hash_password;

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<User, StoreServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        filter: UserFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<User>, StoreServiceError> {
        self.repo.list(&filter, page.map(PageRequest::clamped)).await
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub avatar: Option<ImageRef>,
    pub address: Option<Address>,
    pub is_active: Option<bool>,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, StoreServiceError> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(StoreServiceError::EmailAlreadyExists);
        }
        let user = NewUser {
            email: input.email,
            password_hash: hash_password(input.password).await?,
            role: input.role.unwrap_or_default(),
            first_name: input.first_name,
            last_name: input.last_name,
            phone_number: input.phone_number,
            avatar: input.avatar,
            address: input.address,
            is_active: input.is_active.unwrap_or(true),
        };
        let created = self.repo.create(&user).await?;
        info!(user_id = created.id, "user created");
        Ok(created)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub avatar: Option<ImageRef>,
    pub address: Option<Address>,
    pub is_active: Option<bool>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        input: UpdateUserInput,
    ) -> Result<User, StoreServiceError> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::UserNotFound)?;

        if let Some(email) = input.email {
            if email != user.email {
                let taken = self.repo.find_by_email(&email).await?;
                if taken.is_some_and(|other| other.id != id) {
                    return Err(StoreServiceError::EmailAlreadyExists);
                }
                user.email = email;
            }
        }
        if let Some(password) = input.password {
            user.password_hash = hash_password(password).await?;
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if input.phone_number.is_some() {
            user.phone_number = input.phone_number;
        }
        if input.avatar.is_some() {
            user.avatar = input.avatar;
        }
        if input.address.is_some() {
            user.address = input.address;
        }
        if let Some(is_active) = input.is_active {
            user.is_active = is_active;
        }

        let updated = self.repo.update(&user).await?;
        info!(user_id = id, "user updated");
        Ok(updated)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), StoreServiceError> {
        if !self.repo.delete(id).await? {
            return Err(StoreServiceError::UserNotFound);
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
