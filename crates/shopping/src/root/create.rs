use recipebook_shared::{recipe::Recipe, shopping::UserList};
use serde::Deserialize;
use validator::Validate;

#[derive(Validate, Deserialize, Clone, Debug)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[derive(Validate, Deserialize, Clone, Debug, Default)]
pub struct PortionsInput {
    /// Defaults to the portions the recipe was written for.
    #[validate(range(min = 1, max = 100))]
    pub portions: Option<u16>,
}

impl super::Command {
    pub async fn create(
        &self,
        input: CreateInput,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<UserList> {
        let input = CreateInput {
            name: input.name.trim().to_owned(),
        };
        input.validate()?;

        let mut list = UserList::new(request_by, input.name);
        self.save(&mut list).await?;

        Ok(list)
    }

    /// New list named after a recipe and seeded with its ingredients.
    pub async fn create_from_recipe(
        &self,
        recipe_id: impl Into<String>,
        input: PortionsInput,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<UserList> {
        input.validate()?;

        let request_by: String = request_by.into();
        let recipe = self.recipe(recipe_id, &request_by).await?;

        let name = recipe.title.chars().take(50).collect::<String>();
        let mut list = UserList::new(request_by, name);
        list.recipe_id = Some(recipe.id.to_owned());
        list.extend(recipe.ingredients_for(input.portions.unwrap_or(recipe.portions)));

        self.save(&mut list).await?;

        Ok(list)
    }

    /// Merges the ingredients of a recipe into an existing list.
    pub async fn add_recipe(
        &self,
        id: impl Into<String>,
        recipe_id: impl Into<String>,
        input: PortionsInput,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<UserList> {
        input.validate()?;

        let request_by: String = request_by.into();
        let mut list = self.load(id, &request_by).await?;
        let recipe = self.recipe(recipe_id, &request_by).await?;

        list.extend(recipe.ingredients_for(input.portions.unwrap_or(recipe.portions)));
        self.save(&mut list).await?;

        Ok(list)
    }

    async fn recipe(
        &self,
        id: impl Into<String>,
        request_by: &str,
    ) -> recipebook_shared::Result<Recipe> {
        recipebook_recipe::Command::new(self.state.clone())
            .view(id, request_by)
            .await
    }
}
