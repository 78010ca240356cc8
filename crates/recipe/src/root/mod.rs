use std::ops::Deref;

use recipebook_shared::recipe::{Category, Difficulty, Ingredient};
use serde::Deserialize;
use validator::Validate;

mod create;
mod delete;
mod feed;
mod load;
mod set_visibility;
mod update;
mod upload_image;

pub use upload_image::{IMAGE_CONTENT_TYPE, encode_image};

pub const DEFAULT_IMAGE_MAX_WIDTH: u32 = 1280;

/// Editable part of a recipe, used both on creation and update.
#[derive(Validate, Deserialize, Clone, Debug)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 80))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(length(min = 1), nested)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub directions: Vec<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[validate(range(max = 2880))]
    pub duration: u32,
    #[validate(range(min = 1, max = 100))]
    pub portions: u16,
    #[serde(default)]
    pub is_public: bool,
}

impl RecipeInput {
    fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_owned();
        self.description = self.description.trim().to_owned();
        self.directions = self
            .directions
            .into_iter()
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty())
            .collect();
        for ingredient in self.ingredients.iter_mut() {
            ingredient.name = ingredient.name.trim().to_owned();
        }

        self
    }
}

#[derive(Clone)]
pub struct Command {
    state: recipebook_cloud::State,
    image_max_width: u32,
}

impl Deref for Command {
    type Target = recipebook_cloud::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: recipebook_cloud::State) -> Self {
        Self {
            state,
            image_max_width: DEFAULT_IMAGE_MAX_WIDTH,
        }
    }

    /// Widest image, in pixels, kept on upload.
    pub fn image_max_width(mut self, width: u32) -> Self {
        self.image_max_width = width;
        self
    }
}
