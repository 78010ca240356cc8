use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum RecipeCache {
    Table,
    Id,
    OwnerId,
    OwnerName,
    Title,
    Description,
    Ingredients,
    Directions,
    Category,
    Difficulty,
    Duration,
    Portions,
    ImageUrl,
    IsPublic,
    CreatedAt,
    UpdatedAt,
    SyncedAt,
}

#[derive(Iden, Clone)]
pub enum UserListCache {
    Table,
    Id,
    UserId,
    Name,
    RecipeId,
    Items,
    CreatedAt,
    UpdatedAt,
    SyncedAt,
}

#[derive(Iden, Clone)]
pub enum Session {
    Table,
    Id,
    AccountId,
    CreatedAt,
    ExpireAt,
}

#[derive(Iden, Clone)]
pub enum CloudRecipe {
    Table,
    Id,
    OwnerId,
    IsPublic,
    Data,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum CloudImage {
    Table,
    RecipeId,
    ContentType,
    Data,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum CloudList {
    Table,
    Id,
    UserId,
    Data,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum CloudAccount {
    Table,
    Id,
    Email,
    Password,
    DisplayName,
    CreatedAt,
}
