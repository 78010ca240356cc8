use recipebook_shared::user::Account;
use serde::Deserialize;
use validator::Validate;

use crate::session;

#[derive(Validate, Deserialize, Clone, Debug)]
pub struct ChangePasswordInput {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 64))]
    pub new_password: String,
}

#[derive(Validate, Deserialize, Clone, Debug)]
pub struct ChangeEmailInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    pub async fn profile(
        &self,
        account_id: impl Into<String>,
    ) -> recipebook_shared::Result<Account> {
        let Some(account) = self.accounts.account(&account_id.into()).await? else {
            recipebook_shared::not_found!("account");
        };

        Ok(account)
    }

    /// Changes the password and closes every session but `session_id`.
    pub async fn change_password(
        &self,
        account_id: impl Into<String>,
        session_id: impl Into<String>,
        input: ChangePasswordInput,
    ) -> recipebook_shared::Result<()> {
        input.validate()?;

        let account_id: String = account_id.into();
        let session_id: String = session_id.into();

        self.accounts
            .change_password(&account_id, &input.current_password, &input.new_password)
            .await?;

        let closed = session::remove_others(&self.write_db, &account_id, Some(&session_id)).await?;
        tracing::info!("Password changed for {account_id}, {closed} other session(s) closed");

        Ok(())
    }

    pub async fn change_email(
        &self,
        account_id: impl Into<String>,
        input: ChangeEmailInput,
    ) -> recipebook_shared::Result<Account> {
        let input = ChangeEmailInput {
            email: input.email.trim().to_owned(),
            ..input
        };
        input.validate()?;

        self.accounts
            .change_email(&account_id.into(), &input.password, &input.email)
            .await
    }
}
