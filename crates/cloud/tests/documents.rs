mod helpers;

use recipebook_cloud::{ListService, StorageService, memory};
use recipebook_shared::{
    recipe::{Ingredient, Unit},
    shopping::UserList,
};
use temp_dir::TempDir;

async fn check_recipes(storage: &dyn StorageService) -> anyhow::Result<()> {
    storage
        .put_recipe(&helpers::recipe("01A", "john", true, 1))
        .await?;
    storage
        .put_recipe(&helpers::recipe("01B", "john", false, 2))
        .await?;
    storage
        .put_recipe(&helpers::recipe("01C", "albert", true, 3))
        .await?;

    let feed = storage.recipes().await?;
    let ids = feed.iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["01C", "01A"]);

    let mine = storage.recipes_by_owner("john").await?;
    let ids = mine.iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["01B", "01A"]);

    let mut recipe = helpers::recipe("01B", "john", true, 2);
    recipe.title = "Pancakes".to_owned();
    storage.put_recipe(&recipe).await?;

    assert_eq!(storage.recipe("01B").await?, Some(recipe));
    assert_eq!(storage.recipes().await?.len(), 3);

    storage.delete_recipe("01B").await?;
    assert!(storage.recipe("01B").await?.is_none());
    assert_eq!(storage.recipes().await?.len(), 2);

    Ok(())
}

async fn check_images(storage: &dyn StorageService) -> anyhow::Result<()> {
    let url = storage
        .put_image("01A", "image/jpeg", vec![1, 2, 3])
        .await?;
    assert!(url.starts_with("/recipes/01A/image?v="));

    let image = storage.image("01A").await?.unwrap();
    assert_eq!(image.content_type, "image/jpeg");
    assert_eq!(image.data, vec![1, 2, 3]);

    storage.put_image("01A", "image/jpeg", vec![4]).await?;
    assert_eq!(storage.image("01A").await?.unwrap().data, vec![4]);

    storage.delete_image("01A").await?;
    assert!(storage.image("01A").await?.is_none());

    Ok(())
}

async fn check_lists(lists: &dyn ListService) -> anyhow::Result<()> {
    let mut weekend = UserList::new("john", "Weekend");
    weekend.created_at = 1;
    let mut party = UserList::new("john", "Party");
    party.created_at = 2;
    let other = UserList::new("albert", "Groceries");

    lists.put_list(&weekend).await?;
    lists.put_list(&party).await?;
    lists.put_list(&other).await?;

    let names = lists
        .lists("john")
        .await?
        .into_iter()
        .map(|l| l.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Party", "Weekend"]);

    weekend.add(Ingredient::new("Milk", 1.0, Unit::L));
    weekend.touch();
    lists.put_list(&weekend).await?;
    assert_eq!(lists.list(&weekend.id).await?, Some(weekend.clone()));

    lists.delete_list(&party.id).await?;
    assert!(lists.list(&party.id).await?.is_none());

    assert_eq!(lists.delete_lists_by_user("john").await?, 1);
    assert!(lists.lists("john").await?.is_empty());
    assert_eq!(lists.lists("albert").await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_memory_documents() -> anyhow::Result<()> {
    let backend = memory::Backend::new();

    check_recipes(&backend).await?;
    check_images(&backend).await?;
    check_lists(&backend).await
}

#[tokio::test]
async fn test_sql_documents() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let backend = helpers::setup_sql_backend(dir.child("cloud.sqlite3")).await?;

    check_recipes(&backend).await?;
    check_images(&backend).await?;
    check_lists(&backend).await
}
