use serde::Deserialize;

/// Fallback signing key for local development. Startup refuses to run with
/// it outside of `APP_ENV=development`.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub environment: Environment,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let environment = match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };
        let secret = resolve_jwt_secret(environment, std::env::var("JWT_SECRET").ok())?;
        let jwt = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "fiesta".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "fiesta-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        Ok(Self {
            database_url,
            environment,
            jwt,
        })
    }
}

/// The signing key is explicit configuration: an unset, blank, or
/// known-default key is a fatal startup condition in production.
fn resolve_jwt_secret(environment: Environment, raw: Option<String>) -> anyhow::Result<String> {
    match raw {
        Some(s) if !s.trim().is_empty() && s != DEV_JWT_SECRET => Ok(s),
        _ if environment == Environment::Production => {
            anyhow::bail!("JWT_SECRET must be set to a non-default key in production")
        }
        _ => {
            tracing::warn!("JWT_SECRET unset, falling back to the development default");
            Ok(DEV_JWT_SECRET.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_requires_a_secret() {
        assert!(resolve_jwt_secret(Environment::Production, None).is_err());
        assert!(resolve_jwt_secret(Environment::Production, Some("".into())).is_err());
        assert!(resolve_jwt_secret(Environment::Production, Some(DEV_JWT_SECRET.into())).is_err());
    }

    #[test]
    fn production_accepts_a_real_secret() {
        let secret = resolve_jwt_secret(Environment::Production, Some("long-random-key".into()))
            .expect("real key accepted");
        assert_eq!(secret, "long-random-key");
    }

    #[test]
    fn development_falls_back_to_the_default() {
        let secret = resolve_jwt_secret(Environment::Development, None).expect("fallback allowed");
        assert_eq!(secret, DEV_JWT_SECRET);
    }
}
