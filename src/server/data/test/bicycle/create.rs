use super::*;

/// Tests registering a new bicycle.
///
/// Expected: Ok with bicycle in `available` state
#[tokio::test]
async fn creates_available_bicycle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Bicycle)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BicycleRepository::new(db);
    let bicycle = repo
        .create(
            RegisterBicycleParam {
                name: "Blue Cruiser".to_string(),
                code: "BK-100".to_string(),
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(bicycle.name, "Blue Cruiser");
    assert_eq!(bicycle.code, "BK-100");
    assert_eq!(bicycle.status, BicycleStatus::Available);

    Ok(())
}

/// Tests that bicycle codes are unique.
///
/// Expected: Err on second insert with the same code
#[tokio::test]
async fn rejects_duplicate_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Bicycle)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::bicycle::BicycleFactory::new(db)
        .code("BK-100")
        .build()
        .await?;

    let repo = BicycleRepository::new(db);
    let result = repo
        .create(
            RegisterBicycleParam {
                name: "Copy".to_string(),
                code: "BK-100".to_string(),
            },
            Utc::now(),
        )
        .await;

    assert!(result.is_err());

    Ok(())
}
