use std::io::Cursor;

use image::{ImageFormat, imageops::FilterType};
use recipebook_cloud::Image;
use recipebook_shared::recipe::Recipe;

use crate::cache;

pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Decodes an uploaded picture, shrinks it to `max_width` keeping its ratio
/// and re-encodes it as JPEG.
pub fn encode_image(data: &[u8], max_width: u32) -> recipebook_shared::Result<Vec<u8>> {
    let img = match image::load_from_memory(data) {
        Ok(img) => img,
        Err(e) => recipebook_shared::user!("Invalid image: {e}"),
    };

    let img = if img.width() > max_width {
        img.resize(max_width, u32::MAX, FilterType::Lanczos3)
    } else {
        img
    };

    let mut bytes = Cursor::new(Vec::new());
    img.to_rgb8()
        .write_to(&mut bytes, ImageFormat::Jpeg)
        .map_err(anyhow::Error::from)?;

    Ok(bytes.into_inner())
}

impl super::Command {
    pub async fn upload_image(
        &self,
        id: impl Into<String>,
        data: Vec<u8>,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<Recipe> {
        let mut recipe = self.load_owned(id, request_by).await?;

        let max_width = self.image_max_width;
        let jpeg = tokio::task::spawn_blocking(move || encode_image(&data, max_width))
            .await
            .map_err(anyhow::Error::from)??;

        let url = self
            .storage
            .put_image(&recipe.id, IMAGE_CONTENT_TYPE, jpeg)
            .await?;

        recipe.image_url = Some(url);
        recipe.updated_at = Some(recipebook_shared::now());

        self.storage.put_recipe(&recipe).await?;
        cache::upsert(&self.write_db, &recipe).await?;

        Ok(recipe)
    }

    pub async fn image(&self, id: impl Into<String>) -> recipebook_shared::Result<Option<Image>> {
        self.storage.image(&id.into()).await
    }
}
