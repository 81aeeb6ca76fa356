use super::*;

/// Tests finding an existing user by id.
///
/// Expected: Ok(Some) with matching email
#[tokio::test]
async fn finds_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_admin(db).await?;

    let repo = UserRepository::new(db);
    let user = repo.find_by_id(created.id).await?.unwrap();

    assert_eq!(user.email, created.email);
    assert!(user.is_admin());

    Ok(())
}

/// Tests looking up a user id that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(repo.find_by_id(9999).await?.is_none());

    Ok(())
}

/// Tests that a stored role outside the closed set surfaces as a type error.
///
/// Expected: Err(DbErr::Type)
#[tokio::test]
async fn rejects_unknown_stored_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .role("janitor")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let result = repo.find_by_id(created.id).await;

    assert!(matches!(result, Err(DbErr::Type(_))));

    Ok(())
}
