mod helpers;

use std::io::Cursor;

use axum::http::{StatusCode, header};
use helpers::{TestApp, recipe_body};
use image::{DynamicImage, ImageFormat, RgbImage};
use serde_json::json;

#[tokio::test]
async fn test_create_and_view_recipe() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let john = app.sign_up("john@example.com").await?;
    let albert = app.sign_up("albert@example.com").await?;

    let (status, recipe) = app
        .send("POST", "/recipes", Some(&john), Some(recipe_body("Chocolate cake", true)))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(recipe["owner_name"], "John");
    let id = recipe["id"].as_str().unwrap().to_owned();

    let (status, body) = app
        .send("GET", &format!("/recipes/{id}"), Some(&albert), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Chocolate cake");

    let (status, _) = app
        .send("GET", "/recipes/unknown", Some(&albert), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_invalid_recipe_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let john = app.sign_up("john@example.com").await?;

    let (status, body) = app
        .send("POST", "/recipes", Some(&john), Some(recipe_body("   ", true)))
        .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("title"));

    Ok(())
}

#[tokio::test]
async fn test_private_recipe_is_hidden_from_others() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let john = app.sign_up("john@example.com").await?;
    let albert = app.sign_up("albert@example.com").await?;

    let (_, recipe) = app
        .send("POST", "/recipes", Some(&john), Some(recipe_body("Secret sauce", false)))
        .await?;
    let id = recipe["id"].as_str().unwrap().to_owned();

    let (status, _) = app
        .send("GET", &format!("/recipes/{id}"), Some(&albert), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, feed) = app.send("GET", "/recipes", Some(&albert), None).await?;
    assert_eq!(feed.as_array().map(Vec::len), Some(0));

    let (_, mine) = app.send("GET", "/recipes/mine", Some(&john), None).await?;
    assert_eq!(mine.as_array().map(Vec::len), Some(1));

    let (status, body) = app
        .send(
            "PUT",
            &format!("/recipes/{id}/visibility"),
            Some(&john),
            Some(json!({"is_public": true})),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_public"], true);

    let (_, feed) = app.send("GET", "/recipes", Some(&albert), None).await?;
    assert_eq!(feed[0]["id"], id.as_str());

    Ok(())
}

#[tokio::test]
async fn test_only_owner_can_edit() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let john = app.sign_up("john@example.com").await?;
    let albert = app.sign_up("albert@example.com").await?;

    let (_, recipe) = app
        .send("POST", "/recipes", Some(&john), Some(recipe_body("Chocolate cake", true)))
        .await?;
    let uri = format!("/recipes/{}", recipe["id"].as_str().unwrap());

    let (status, _) = app
        .send("PUT", &uri, Some(&albert), Some(recipe_body("Vanilla cake", true)))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send("DELETE", &uri, Some(&albert), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send("PUT", &uri, Some(&john), Some(recipe_body("Vanilla cake", true)))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Vanilla cake");
    assert!(body["updated_at"].is_i64());

    let (status, _) = app.send("DELETE", &uri, Some(&john), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send("GET", &uri, Some(&john), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_feed_filters() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let john = app.sign_up("john@example.com").await?;

    app.send("POST", "/recipes", Some(&john), Some(recipe_body("Chocolate cake", true)))
        .await?;
    app.send("POST", "/recipes", Some(&john), Some(recipe_body("Lemon tart", true)))
        .await?;

    let (_, feed) = app
        .send("GET", "/recipes?category=Dessert&search=tart", Some(&john), None)
        .await?;
    assert_eq!(feed.as_array().map(Vec::len), Some(1));
    assert_eq!(feed[0]["title"], "Lemon tart");

    let (_, feed) = app
        .send("GET", "/recipes?category=Dinner", Some(&john), None)
        .await?;
    assert_eq!(feed.as_array().map(Vec::len), Some(0));

    let (_, feed) = app.send("GET", "/recipes?limit=1", Some(&john), None).await?;
    assert_eq!(feed.as_array().map(Vec::len), Some(1));

    Ok(())
}

#[tokio::test]
async fn test_feed_served_from_cache_when_offline() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let john = app.sign_up("john@example.com").await?;

    app.send("POST", "/recipes", Some(&john), Some(recipe_body("Chocolate cake", true)))
        .await?;

    app.backend.set_offline(true);

    let (status, feed) = app.send("GET", "/recipes", Some(&john), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed[0]["title"], "Chocolate cake");

    let (status, _) = app
        .send("POST", "/recipes", Some(&john), Some(recipe_body("Lemon tart", true)))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}

#[tokio::test]
async fn test_invalid_image_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let john = app.sign_up("john@example.com").await?;

    let (_, recipe) = app
        .send("POST", "/recipes", Some(&john), Some(recipe_body("Chocolate cake", true)))
        .await?;
    let id = recipe["id"].as_str().unwrap().to_owned();

    let (status, _) = app
        .send(
            "PUT",
            &format!("/recipes/{id}/image"),
            Some(&john),
            Some(json!("not an image")),
        )
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .send("GET", &format!("/recipes/{id}/image"), None, None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_image_upload_and_public_download() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let john = app.sign_up("john@example.com").await?;

    let (_, recipe) = app
        .send("POST", "/recipes", Some(&john), Some(recipe_body("Chocolate cake", true)))
        .await?;
    let uri = format!("/recipes/{}/image", recipe["id"].as_str().unwrap());

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::new(64, 48)).write_to(&mut png, ImageFormat::Png)?;
    let png = png.into_inner();

    let (status, _, _) = app.send_bytes("PUT", &uri, None, png.clone()).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = app.send_bytes("PUT", &uri, Some(&john), png).await?;
    assert_eq!(status, StatusCode::OK);
    let recipe: serde_json::Value = serde_json::from_slice(&body)?;
    assert!(recipe["image_url"].is_string());

    let (status, headers, body) = app.send_bytes("GET", &uri, None, Vec::new()).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");

    let image = image::load_from_memory(&body)?;
    assert_eq!((image.width(), image.height()), (64, 48));

    Ok(())
}
