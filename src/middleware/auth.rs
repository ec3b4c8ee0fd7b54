//! Middleware de autenticación JWT
//! 
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y la inyección del usuario autenticado en las requests. El resto del
//! sistema nunca ve el token: solo el valor AuthenticatedUser explícito.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::environment::EnvironmentConfig;
use crate::models::user::{User, UserRole};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let authenticated_user = decode_token(auth_header, &state.config)?;

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Decodificar y validar un token, devolviendo el usuario autenticado
pub fn decode_token(
    token: &str,
    config: &EnvironmentConfig,
) -> Result<AuthenticatedUser, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

    let claims = token_data.claims;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

    let role = UserRole::from_str(&claims.role)
        .ok_or_else(|| AppError::Unauthorized("Invalid role in token".to_string()))?;

    Ok(AuthenticatedUser {
        user_id,
        username: claims.username,
        role,
    })
}

/// Función para generar JWT token
pub fn generate_jwt_token(user: &User, config: &EnvironmentConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role().as_str().to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generating JWT: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            cors_origins: vec![],
            trial_days: 15,
            license_salt: "test-salt".to_string(),
        }
    }

    fn test_user(id: i64, role: &str) -> User {
        User {
            id,
            username: format!("user{}", id),
            password_hash: "irrelevant".to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let config = test_config();
        let user = test_user(42, "admin");

        let token = generate_jwt_token(&user, &config).expect("token generated");
        let decoded = decode_token(&token, &config).expect("token decoded");

        assert_eq!(decoded.user_id, 42);
        assert_eq!(decoded.username, "user42");
        assert_eq!(decoded.role, UserRole::Admin);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let config = test_config();
        assert!(decode_token("not-a-token", &config).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let config = test_config();
        let user = test_user(1, "user");
        let token = generate_jwt_token(&user, &config).expect("token generated");

        let mut other = test_config();
        other.jwt_secret = "another-secret".to_string();
        assert!(decode_token(&token, &other).is_err());
    }
}
