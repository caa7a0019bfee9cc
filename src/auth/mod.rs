//! Registration, login and bearer tokens.

mod jwt;
mod service;

pub use jwt::{Claims, JwtKeys};
pub use service::AuthService;

use serde::{Deserialize, Serialize};
use store::Document;
use validator::Validate;

pub const ALREADY_REGISTERED_ERROR: &str = "Такой пользователь уже был зарегистрирован";
pub const USER_NOT_FOUND_ERROR: &str = "Пользователь не найден";
pub const WRONG_PASSWORD_ERROR: &str = "Неверный пароль";

/// A registered account. Only the bcrypt hash of the password is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub password_hash: String,
}

impl Document for User {
    const COLLECTION: &'static str = "user";

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("email", self.email.clone())]
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AuthDto {
    #[validate(email(message = "login должен быть email"))]
    pub login: String,
    #[validate(length(min = 1, message = "Пароль не может быть пустым"))]
    pub password: String,
}

/// Body returned by a successful login.
///
/// The key is spelled `acces_token` on the wire; existing clients read it
/// under that name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "acces_token")]
    pub access_token: String,
}

/// Public view of a freshly registered user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisteredUser {
    #[serde(rename = "_id")]
    pub id: store::DocumentId,
    pub email: String,
}
