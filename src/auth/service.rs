use std::sync::Arc;

use store::{DocumentStore, StoreError};

use super::{
    ALREADY_REGISTERED_ERROR, AuthDto, Claims, JwtKeys, LoginResponse, RegisteredUser,
    USER_NOT_FOUND_ERROR, User, WRONG_PASSWORD_ERROR,
};
use crate::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<DocumentStore>,
    keys: JwtKeys,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<DocumentStore>, keys: JwtKeys, bcrypt_cost: u32) -> Self {
        Self {
            store,
            keys,
            bcrypt_cost,
        }
    }

    pub fn register(&self, dto: AuthDto) -> ServiceResult<RegisteredUser> {
        let users = self.store.collection::<User>();
        if users.find_one(|user| user.email == dto.login)?.is_some() {
            return Err(ServiceError::Conflict(ALREADY_REGISTERED_ERROR));
        }

        let password_hash = bcrypt::hash(&dto.password, self.bcrypt_cost)?;
        let user = users
            .insert(User {
                email: dto.login,
                password_hash,
            })
            .map_err(|err| match err {
                // Lost a race with a concurrent registration.
                StoreError::Duplicate { .. } => ServiceError::Conflict(ALREADY_REGISTERED_ERROR),
                other => ServiceError::Store(other),
            })?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(RegisteredUser {
            id: user.id,
            email: user.data.email,
        })
    }

    /// Check credentials, returning the account email on success.
    pub fn validate_user(&self, login: &str, password: &str) -> ServiceResult<String> {
        let user = self
            .store
            .collection::<User>()
            .find_one(|user| user.email == login)?
            .ok_or(ServiceError::Unauthorized(USER_NOT_FOUND_ERROR))?;

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(ServiceError::Unauthorized(WRONG_PASSWORD_ERROR));
        }
        Ok(user.data.email)
    }

    pub fn login(&self, email: &str) -> ServiceResult<LoginResponse> {
        Ok(LoginResponse {
            access_token: self.keys.issue(email)?,
        })
    }

    pub fn verify_token(&self, token: &str) -> ServiceResult<Claims> {
        self.keys.verify(token)
    }
}
