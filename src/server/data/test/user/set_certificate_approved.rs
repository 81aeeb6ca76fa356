use super::*;

/// Tests toggling the cached certificate flag.
///
/// Expected: Ok with flag reflecting the last write
#[tokio::test]
async fn sets_and_clears_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.set_certificate_approved(created.id, true).await?;
    assert!(repo.find_by_id(created.id).await?.unwrap().certificate_approved);

    repo.set_certificate_approved(created.id, false).await?;
    assert!(!repo.find_by_id(created.id).await?.unwrap().certificate_approved);

    Ok(())
}
