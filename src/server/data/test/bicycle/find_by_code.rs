use super::*;

/// Tests finding a bicycle by its frame tag.
///
/// Expected: Ok(Some) for a known code, Ok(None) otherwise
#[tokio::test]
async fn finds_bicycle_by_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Bicycle)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::bicycle::BicycleFactory::new(db)
        .code("BK-7")
        .build()
        .await?;

    let repo = BicycleRepository::new(db);

    assert_eq!(repo.find_by_code("BK-7").await?.unwrap().id, created.id);
    assert!(repo.find_by_code("BK-8").await?.is_none());

    Ok(())
}
