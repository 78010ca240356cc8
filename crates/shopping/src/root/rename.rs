use recipebook_shared::shopping::UserList;
use serde::Deserialize;
use validator::Validate;

#[derive(Validate, Deserialize, Clone, Debug)]
pub struct RenameInput {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

impl super::Command {
    pub async fn rename(
        &self,
        id: impl Into<String>,
        input: RenameInput,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<UserList> {
        let input = RenameInput {
            name: input.name.trim().to_owned(),
        };
        input.validate()?;

        let mut list = self.load(id, request_by).await?;
        list.name = input.name;
        self.save(&mut list).await?;

        Ok(list)
    }
}
