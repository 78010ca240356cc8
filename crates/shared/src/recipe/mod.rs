use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum Unit {
    G,
    Kg,
    Ml,
    L,
    Tsp,
    Tbsp,
    Cup,
    #[default]
    Piece,
    Pinch,
}

#[derive(Validate, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    #[serde(default)]
    pub unit: Unit,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            amount,
            unit,
        }
    }

    /// Ingredients sharing a key are the same shopping item.
    pub fn key(&self) -> String {
        format!("{}_{}", self.name.trim().to_lowercase(), self.unit)
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum Category {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
    Dessert,
    Snack,
    Drink,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub owner_id: String,
    pub owner_name: Option<String>,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub directions: Vec<String>,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Minutes from start to table.
    pub duration: u32,
    pub portions: u16,
    pub image_url: Option<String>,
    pub is_public: bool,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl Recipe {
    /// Ingredients scaled for the requested number of portions.
    pub fn ingredients_for(&self, portions: u16) -> Vec<Ingredient> {
        scale_ingredients(&self.ingredients, self.portions, portions)
    }
}

pub fn scale_ingredients(ingredients: &[Ingredient], from: u16, to: u16) -> Vec<Ingredient> {
    let ratio = if from == 0 {
        1.0
    } else {
        f64::from(to) / f64::from(from)
    };

    ingredients
        .iter()
        .map(|ingredient| Ingredient {
            name: ingredient.name.to_owned(),
            amount: crate::round_amount(ingredient.amount * ratio),
            unit: ingredient.unit,
        })
        .collect()
}

/// Sums amounts of ingredients sharing a key, keeping first-seen order.
pub fn merge_ingredients(
    existing: impl IntoIterator<Item = Ingredient>,
    incoming: impl IntoIterator<Item = Ingredient>,
) -> Vec<Ingredient> {
    let mut merged: Vec<Ingredient> = vec![];

    for ingredient in existing.into_iter().chain(incoming) {
        let key = ingredient.key();
        match merged.iter_mut().find(|i| i.key() == key) {
            Some(entry) => entry.amount = crate::round_amount(entry.amount + ingredient.amount),
            None => merged.push(ingredient),
        }
    }

    merged
}
