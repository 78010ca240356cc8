use recipebook_shared::user::Account;
use serde::Deserialize;
use validator::Validate;

use crate::{jwt, session};

#[derive(Validate, Deserialize, Clone, Debug)]
pub struct SignInInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// An open session the token was checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub account_id: String,
    pub session_id: String,
}

impl super::Command {
    pub async fn sign_in(
        &self,
        input: SignInInput,
    ) -> recipebook_shared::Result<(Account, String)> {
        input.validate()?;

        let account = self.accounts.sign_in(&input.email, &input.password).await?;
        let token = self.open_session(&account.id).await?;

        Ok((account, token))
    }

    pub async fn sign_out(&self, token: &str) -> recipebook_shared::Result<()> {
        let Ok(claims) = jwt::validate_jwt(token, &self.jwt_secret) else {
            recipebook_shared::unauthorized!("Invalid token");
        };

        session::remove(&self.write_db, &claims.sid).await?;

        Ok(())
    }

    pub async fn authenticate(&self, token: &str) -> recipebook_shared::Result<Authenticated> {
        let claims = match jwt::validate_jwt(token, &self.jwt_secret) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("Invalid JWT token: {e:?}");
                recipebook_shared::unauthorized!("Invalid token");
            }
        };

        let Some(row) = session::find(&self.read_db, &claims.sid).await? else {
            recipebook_shared::unauthorized!("Session closed");
        };

        if row.account_id != claims.sub || row.expire_at < recipebook_shared::now() {
            recipebook_shared::unauthorized!("Session expired");
        }

        Ok(Authenticated {
            account_id: claims.sub,
            session_id: claims.sid,
        })
    }

    /// Records a session for the account and returns the token carrying it.
    /// Expired sessions of the account are dropped on the way.
    pub(crate) async fn open_session(
        &self,
        account_id: &str,
    ) -> recipebook_shared::Result<String> {
        let expired = session::remove_expired(&self.write_db, account_id).await?;
        if expired > 0 {
            tracing::debug!("Dropped {expired} expired session(s) of {account_id}");
        }

        let session_id = recipebook_shared::new_id();
        let lifetime = self.session_days * 24 * 60 * 60;
        let expire_at = recipebook_shared::now() + (lifetime as i64) * 1000;

        session::create(&self.write_db, &session_id, account_id, expire_at).await?;

        Ok(jwt::generate_jwt(
            account_id.to_owned(),
            session_id,
            &self.jwt_secret,
            lifetime,
        )?)
    }
}
