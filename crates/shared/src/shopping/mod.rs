use serde::{Deserialize, Serialize};

use crate::recipe::Ingredient;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub ingredient: Ingredient,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub recipe_id: Option<String>,
    pub items: Vec<ListItem>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl UserList {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: crate::new_id(),
            user_id: user_id.into(),
            name: name.into(),
            recipe_id: None,
            items: vec![],
            created_at: crate::now(),
            updated_at: None,
        }
    }

    /// Adds an ingredient, folding it into an unchecked item with the same key.
    /// Returns the id of the item holding the ingredient.
    pub fn add(&mut self, ingredient: Ingredient) -> String {
        let key = ingredient.key();

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| !item.checked && item.ingredient.key() == key)
        {
            let amount = item.ingredient.amount + ingredient.amount;
            item.ingredient.amount = crate::round_amount(amount);

            return item.id.to_owned();
        }

        let id = crate::new_id();
        self.items.push(ListItem {
            id: id.to_owned(),
            ingredient,
            checked: false,
        });

        id
    }

    pub fn extend(&mut self, ingredients: impl IntoIterator<Item = Ingredient>) {
        for ingredient in ingredients {
            self.add(ingredient);
        }
    }

    /// Flips the checked flag, returning the new state.
    pub fn toggle(&mut self, item_id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == item_id)?;
        item.checked = !item.checked;

        Some(item.checked)
    }

    pub fn remove(&mut self, item_id: &str) -> bool {
        let len = self.items.len();
        self.items.retain(|item| item.id != item_id);

        len != self.items.len()
    }

    /// Drops every checked item, returning how many were removed.
    pub fn clear_checked(&mut self) -> usize {
        let len = self.items.len();
        self.items.retain(|item| !item.checked);

        len - self.items.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(crate::now());
    }
}
