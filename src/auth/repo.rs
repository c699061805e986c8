use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::User;

/// Insert payload; the password must already be hashed by the caller.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub phone: Option<&'a str>,
}

/// Partial profile update; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
}

impl User {
    /// Look a user up by username or email, whichever matches.
    pub async fn find_by_login_identifier(
        db: &PgPool,
        identifier: &str,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, surname, username, email, password_hash, phone, created_at
            FROM users
            WHERE username = $1 OR email = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, surname, username, email, password_hash, phone, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user. Unique violations on username or email surface as
    /// `sqlx::Error::Database` and are mapped to a duplicate-identity error
    /// at the boundary.
    pub async fn create(db: &PgPool, new: NewUser<'_>) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, surname, username, email, password_hash, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, surname, username, email, password_hash, phone, created_at
            "#,
        )
        .bind(new.name)
        .bind(new.surname)
        .bind(new.username)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.phone)
        .fetch_one(db)
        .await
    }

    /// Apply a partial profile update in one row write.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name          = COALESCE($2, name),
                surname       = COALESCE($3, surname),
                username      = COALESCE($4, username),
                email         = COALESCE($5, email),
                password_hash = COALESCE($6, password_hash),
                phone         = COALESCE($7, phone)
            WHERE id = $1
            RETURNING id, name, surname, username, email, password_hash, phone, created_at
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.surname)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(&changes.phone)
        .fetch_optional(db)
        .await
    }
}
