use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{error::ApiError, state::AppState, validate};

use super::{
    dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest, UpdateProfileRequest},
    extractors::AuthUser,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::{NewUser, ProfileChanges},
    repo_types::User,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me).patch(update_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.name = payload.name.trim().to_string();
    payload.surname = payload.surname.trim().to_string();
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    validate::required("name", &payload.name)?;
    validate::required("surname", &payload.surname)?;
    validate::required("username", &payload.username)?;
    if !validate::is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::validation("email", "invalid email"));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::validation(
            "password",
            "password must be at least 8 characters",
        ));
    }

    // Ensure neither the username nor the email is taken. The unique
    // constraints still backstop a race between this check and the insert.
    if User::find_by_login_identifier(&state.db, &payload.username)
        .await?
        .is_some()
        || User::find_by_login_identifier(&state.db, &payload.email)
            .await?
            .is_some()
    {
        warn!(username = %payload.username, "identity already registered");
        return Err(ApiError::DuplicateIdentity);
    }

    let hash = hash_password(&payload.password).map_err(ApiError::Internal)?;

    let user = User::create(
        &state.db,
        NewUser {
            name: &payload.name,
            surname: &payload.surname,
            username: &payload.username,
            email: &payload.email,
            password_hash: &hash,
            phone: payload.phone.as_deref(),
        },
    )
    .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let identifier = payload.login_identifier.trim();

    let user = User::find_by_login_identifier(&state.db, identifier)
        .await?
        .ok_or_else(|| {
            warn!(identifier, "login with unknown identifier");
            ApiError::InvalidCredentials
        })?;

    let ok = verify_password(&payload.password, &user.password_hash).map_err(ApiError::Internal)?;
    if !ok {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(ApiError::Internal)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    for (field, value) in [
        ("name", &payload.name),
        ("surname", &payload.surname),
        ("username", &payload.username),
    ] {
        if let Some(v) = value {
            validate::required(field, v)?;
        }
    }
    let email = match payload.email.as_deref() {
        Some(raw) => {
            let normalized = raw.trim().to_lowercase();
            if !validate::is_valid_email(&normalized) {
                return Err(ApiError::validation("email", "invalid email"));
            }
            Some(normalized)
        }
        None => None,
    };

    // A submitted plaintext password goes through the hasher; the stored
    // hash cannot be overwritten with a caller-supplied value.
    let password_hash = match payload.password.as_deref() {
        Some(plain) => {
            if plain.len() < 8 {
                return Err(ApiError::validation(
                    "password",
                    "password must be at least 8 characters",
                ));
            }
            Some(hash_password(plain).map_err(ApiError::Internal)?)
        }
        None => None,
    };

    let changes = ProfileChanges {
        name: payload.name.map(|v| v.trim().to_string()),
        surname: payload.surname.map(|v| v.trim().to_string()),
        username: payload.username.map(|v| v.trim().to_string()),
        email,
        password_hash,
        phone: payload.phone,
    };

    let user = User::update_profile(&state.db, user_id, &changes)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(user.into()))
}
