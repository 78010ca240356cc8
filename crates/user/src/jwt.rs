use anyhow::{Context, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account id.
    pub sub: String,
    /// Session id, the token is only honoured while the session row exists.
    pub sid: String,
    pub exp: usize,
    pub iat: usize,
}

/// Generate an HS256 token for a session, valid for `expiration_seconds`.
pub fn generate_jwt(
    account_id: String,
    session_id: String,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("Failed to get current time")?
        .as_secs() as usize;

    let claims = Claims {
        sub: account_id,
        sid: session_id,
        exp: now + expiration_seconds as usize,
        iat: now,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT")?;

    Ok(token)
}

/// Validate and decode a token
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT")?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_minimum_32_characters_long";

    #[test]
    fn test_generate_and_validate_jwt() {
        let token = generate_jwt("john".to_owned(), "session".to_owned(), SECRET, 3600).unwrap();

        let claims = validate_jwt(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "john");
        assert_eq!(claims.sid, "session");
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_invalid_secret_fails_validation() {
        let token = generate_jwt("john".to_owned(), "session".to_owned(), SECRET, 3600).unwrap();

        assert!(validate_jwt(&token, "wrong_secret").is_err());
        assert!(validate_jwt("not-a-token", SECRET).is_err());
    }
}
