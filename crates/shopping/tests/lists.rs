mod helpers;

use recipebook_cloud::ListService;
use recipebook_shared::{
    Error,
    recipe::{Ingredient, Unit},
    shopping::UserList,
};
use recipebook_shopping::{Command, CreateInput, PortionsInput, RenameInput};
use temp_dir::TempDir;

fn create_input(name: &str) -> CreateInput {
    CreateInput {
        name: name.to_owned(),
    }
}

#[tokio::test]
async fn test_create_and_rename() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (state, _) = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command::new(state);

    let err = command.create(create_input("  "), "john").await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let list = command.create(create_input(" Weekend "), "john").await?;
    assert_eq!(list.name, "Weekend");
    assert!(list.items.is_empty());

    let err = command
        .rename(
            &list.id,
            RenameInput {
                name: "Party".to_owned(),
            },
            "albert",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let renamed = command
        .rename(
            &list.id,
            RenameInput {
                name: "Party".to_owned(),
            },
            "john",
        )
        .await?;
    assert_eq!(renamed.name, "Party");
    assert!(renamed.updated_at.is_some());

    let lists = command.lists("john").await?;
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name, "Party");
    assert!(command.lists("albert").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_create_from_recipe_scales_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (state, _) = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let recipes = recipebook_recipe::Command::new(state.clone());
    let command = Command::new(state);

    let recipe = recipes
        .create(helpers::recipe_input("Pancakes"), "albert", None)
        .await?;

    let list = command
        .create_from_recipe(&recipe.id, PortionsInput { portions: Some(8) }, "john")
        .await?;
    assert_eq!(list.name, "Pancakes");
    assert_eq!(list.recipe_id.as_deref(), Some(recipe.id.as_str()));
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].ingredient.amount, 500.0);
    assert_eq!(list.items[1].ingredient.amount, 4.0);

    let list = command
        .add_recipe(&list.id, &recipe.id, PortionsInput::default(), "john")
        .await?;
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].ingredient.amount, 750.0);
    assert_eq!(list.items[1].ingredient.amount, 6.0);

    let err = command
        .create_from_recipe(&recipe.id, PortionsInput { portions: Some(0) }, "john")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let err = command
        .create_from_recipe("unknown", PortionsInput::default(), "john")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_private_recipe_cannot_seed_other_users_list() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (state, _) = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let recipes = recipebook_recipe::Command::new(state.clone());
    let command = Command::new(state);

    let mut input = helpers::recipe_input("Secret sauce");
    input.is_public = false;
    let recipe = recipes.create(input, "albert", None).await?;

    let err = command
        .create_from_recipe(&recipe.id, PortionsInput::default(), "john")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    command
        .create_from_recipe(&recipe.id, PortionsInput::default(), "albert")
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_items_toggle_remove_and_clear() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (state, _) = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command::new(state);

    let list = command.create(create_input("Weekend"), "john").await?;

    let err = command
        .add_item(&list.id, Ingredient::new("Milk", -1.0, Unit::L), "john")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    command
        .add_item(&list.id, Ingredient::new("Milk", 1.0, Unit::L), "john")
        .await?;
    command
        .add_item(&list.id, Ingredient::new(" milk", 0.5, Unit::L), "john")
        .await?;
    let list = command
        .add_item(&list.id, Ingredient::new("Eggs", 6.0, Unit::Piece), "john")
        .await?;
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].ingredient.amount, 1.5);

    let milk = list.items[0].id.to_owned();
    let eggs = list.items[1].id.to_owned();

    let list = command.toggle(&list.id, &milk, "john").await?;
    assert!(list.items[0].checked);

    let err = command.toggle(&list.id, "unknown", "john").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let list = command.remove_item(&list.id, &eggs, "john").await?;
    assert_eq!(list.items.len(), 1);

    let err = command
        .remove_item(&list.id, &eggs, "john")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let list = command.clear_checked(&list.id, "john").await?;
    assert!(list.items.is_empty());

    let reloaded = command.load(&list.id, "john").await?;
    assert_eq!(reloaded, list);

    Ok(())
}

#[tokio::test]
async fn test_lists_fall_back_to_cache_when_offline() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (state, backend) = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command::new(state);

    let weekend = command.create(create_input("Weekend"), "john").await?;
    let party = command.create(create_input("Party"), "john").await?;
    assert_eq!(command.lists("john").await?.len(), 2);

    command.delete(&party.id, "john").await?;

    backend.set_offline(true);

    let lists = command.lists("john").await?;
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].id, weekend.id);
    assert_eq!(command.load(&weekend.id, "john").await?, weekend);

    let err = command
        .add_item(&weekend.id, Ingredient::new("Milk", 1.0, Unit::L), "john")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server(_)));

    let err = command.load(&party.id, "john").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_remote_deletion_is_synced_on_read() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (state, backend) = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command::new(state);

    let list = command.create(create_input("Weekend"), "john").await?;
    backend.delete_list(&list.id).await?;

    assert!(command.lists("john").await?.is_empty());

    backend.set_offline(true);
    assert!(command.lists("john").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_lists_sync_many_documents() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (state, backend) = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command::new(state);

    let stale = command.create(create_input("Old"), "john").await?;
    backend.delete_list(&stale.id).await?;

    for i in 0..4200 {
        backend
            .put_list(&UserList::new("john", format!("List {i}")))
            .await?;
    }

    assert_eq!(command.lists("john").await?.len(), 4200);

    backend.set_offline(true);

    let cached = command.lists("john").await?;
    assert_eq!(cached.len(), 4200);
    assert!(cached.iter().all(|list| list.id != stale.id));

    Ok(())
}
