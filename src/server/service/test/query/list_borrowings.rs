use super::*;

/// Tests that whitespace-only search text is ignored.
///
/// Expected: Ok with every borrowing, newest first
#[tokio::test]
async fn blank_search_lists_everything() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_user(db).await?;
    let (_, older) = factory::helpers::create_loan_with_status(
        db,
        student.id,
        Utc::now() - Duration::days(20),
        "overdue",
    )
    .await?;
    let (_, newer) = factory::helpers::create_open_loan(db, student.id).await?;

    let query = QueryService::new(db);
    let ids: Vec<i32> = query
        .list_borrowings(BorrowingFilter {
            status: None,
            search: Some("   ".to_string()),
        })
        .await?
        .into_iter()
        .map(|b| b.id)
        .collect();

    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

/// Tests combining a status filter with trimmed search text.
///
/// Expected: Ok with the matching overdue borrowing only
#[tokio::test]
async fn combines_status_and_search() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ana = factory::user::UserFactory::new(db)
        .name("Ana Souza")
        .build()
        .await?;
    let bruno = factory::user::UserFactory::new(db)
        .name("Bruno Reis")
        .build()
        .await?;
    let (_, ana_overdue) = factory::helpers::create_loan_with_status(
        db,
        ana.id,
        Utc::now() - Duration::days(20),
        "overdue",
    )
    .await?;
    factory::helpers::create_open_loan(db, ana.id).await?;
    factory::helpers::create_loan_with_status(
        db,
        bruno.id,
        Utc::now() - Duration::days(20),
        "overdue",
    )
    .await?;

    let query = QueryService::new(db);
    let listed = query
        .list_borrowings(BorrowingFilter {
            status: Some(BorrowingStatus::Overdue),
            search: Some("  Souza ".to_string()),
        })
        .await?;

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, ana_overdue.id);

    Ok(())
}
