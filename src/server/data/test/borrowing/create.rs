use super::*;

/// Tests inserting a new borrowing.
///
/// Expected: Ok with an active borrowing and no return time
#[tokio::test]
async fn creates_active_borrowing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bicycle = factory::create_bicycle(db).await?;
    let now = Utc::now();

    let repo = BorrowingRepository::new(db);
    let borrowing = repo
        .create(user.id, bicycle.id, now, now + Duration::days(14))
        .await?;

    assert_eq!(borrowing.user_id, user.id);
    assert_eq!(borrowing.bicycle_id, bicycle.id);
    assert_eq!(borrowing.status, BorrowingStatus::Active);
    assert_eq!(borrowing.due_at - borrowing.borrowed_at, Duration::days(14));
    assert!(borrowing.returned_at.is_none());

    Ok(())
}
