use recipebook_shared::{recipe::Ingredient, shopping::UserList};
use validator::Validate;

impl super::Command {
    pub async fn add_item(
        &self,
        id: impl Into<String>,
        ingredient: Ingredient,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<UserList> {
        let ingredient = Ingredient {
            name: ingredient.name.trim().to_owned(),
            ..ingredient
        };
        ingredient.validate()?;

        let mut list = self.load(id, request_by).await?;
        list.add(ingredient);
        self.save(&mut list).await?;

        Ok(list)
    }

    pub async fn toggle(
        &self,
        id: impl Into<String>,
        item_id: impl Into<String>,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<UserList> {
        let item_id: String = item_id.into();
        let mut list = self.load(id, request_by).await?;

        if list.toggle(&item_id).is_none() {
            recipebook_shared::not_found!("item");
        }

        self.save(&mut list).await?;

        Ok(list)
    }

    pub async fn remove_item(
        &self,
        id: impl Into<String>,
        item_id: impl Into<String>,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<UserList> {
        let item_id: String = item_id.into();
        let mut list = self.load(id, request_by).await?;

        if !list.remove(&item_id) {
            recipebook_shared::not_found!("item");
        }

        self.save(&mut list).await?;

        Ok(list)
    }

    pub async fn clear_checked(
        &self,
        id: impl Into<String>,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<UserList> {
        let mut list = self.load(id, request_by).await?;

        if list.clear_checked() > 0 {
            self.save(&mut list).await?;
        }

        Ok(list)
    }
}
