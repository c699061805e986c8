use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request body for login; the identifier may be a username or an email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login_identifier: String,
    pub password: String,
}

/// Partial self-service profile update. A submitted `password` is hashed
/// before it is stored; the stored hash is not writable through this path.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            username: user.username,
            email: user.email,
            phone: user.phone,
        }
    }
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_phone_is_optional() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"name":"Ana","surname":"Lopez","username":"analopez",
                "email":"ana@example.com","password":"hunter2hunter2"}"#,
        )
        .expect("deserialize");
        assert!(req.phone.is_none());
    }

    #[test]
    fn update_request_accepts_any_subset_of_fields() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"phone":"+34 600 000 000"}"#).expect("deserialize");
        assert!(req.name.is_none());
        assert!(req.password.is_none());
        assert_eq!(req.phone.as_deref(), Some("+34 600 000 000"));
    }
}
