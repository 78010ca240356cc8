use recipebook_cloud::NewAccount;
use recipebook_shared::user::Account;
use serde::Deserialize;
use validator::Validate;

#[derive(Validate, Deserialize, Clone, Debug)]
pub struct SignUpInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    #[validate(length(min = 1, max = 50))]
    pub display_name: Option<String>,
}

impl super::Command {
    pub async fn sign_up(
        &self,
        input: SignUpInput,
    ) -> recipebook_shared::Result<(Account, String)> {
        let input = SignUpInput {
            email: input.email.trim().to_owned(),
            display_name: input
                .display_name
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty()),
            ..input
        };
        input.validate()?;

        let account = self
            .accounts
            .register(NewAccount {
                email: input.email,
                password: input.password,
                display_name: input.display_name,
            })
            .await?;

        tracing::info!("Account {} registered", account.id);

        let token = self.open_session(&account.id).await?;

        Ok((account, token))
    }
}
