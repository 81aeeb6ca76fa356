use super::*;

/// Tests ordering: newest borrowed_at first.
///
/// Expected: Ok with borrowings in descending borrow time
#[tokio::test]
async fn lists_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let (_, older) =
        factory::helpers::create_loan_with_status(db, user.id, now - Duration::days(3), "active")
            .await?;
    let (_, newer) = factory::helpers::create_loan_with_status(db, user.id, now, "active").await?;

    let repo = BorrowingRepository::new(db);
    let ids: Vec<i32> = repo
        .list(&BorrowingFilter::default())
        .await?
        .into_iter()
        .map(|b| b.id)
        .collect();

    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

/// Tests status filtering.
///
/// Expected: Ok with only the overdue borrowing
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::helpers::create_open_loan(db, user.id).await?;
    let (_, overdue) = factory::helpers::create_loan_with_status(
        db,
        user.id,
        Utc::now() - Duration::days(20),
        "overdue",
    )
    .await?;

    let repo = BorrowingRepository::new(db);
    let listed = repo
        .list(&BorrowingFilter {
            status: Some(BorrowingStatus::Overdue),
            search: None,
        })
        .await?;

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, overdue.id);

    Ok(())
}

/// Tests free-text search across borrower and bicycle fields.
///
/// Expected: Ok with matches on user name, user email, bicycle name and bicycle code
#[tokio::test]
async fn searches_user_and_bicycle_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ana = factory::user::UserFactory::new(db)
        .name("Ana Souza")
        .email("ana@campus.test")
        .build()
        .await?;
    let bruno = factory::user::UserFactory::new(db)
        .name("Bruno Reis")
        .email("bruno@campus.test")
        .build()
        .await?;
    let red = factory::bicycle::BicycleFactory::new(db)
        .name("Red Roadster")
        .code("FRAME-RED")
        .status("borrowed")
        .build()
        .await?;
    let blue = factory::bicycle::BicycleFactory::new(db)
        .name("Blue Cruiser")
        .code("FRAME-BLUE")
        .status("borrowed")
        .build()
        .await?;
    let ana_loan = factory::borrowing::BorrowingFactory::new(db, ana.id, red.id)
        .build()
        .await?;
    let bruno_loan = factory::borrowing::BorrowingFactory::new(db, bruno.id, blue.id)
        .build()
        .await?;

    let repo = BorrowingRepository::new(db);
    let search = |term: &str| BorrowingFilter {
        status: None,
        search: Some(term.to_string()),
    };

    let by_name = repo.list(&search("Souza")).await?;
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, ana_loan.id);

    let by_email = repo.list(&search("bruno@")).await?;
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].id, bruno_loan.id);

    let by_bicycle_name = repo.list(&search("Roadster")).await?;
    assert_eq!(by_bicycle_name.len(), 1);
    assert_eq!(by_bicycle_name[0].id, ana_loan.id);

    let by_code = repo.list(&search("FRAME-BLUE")).await?;
    assert_eq!(by_code.len(), 1);
    assert_eq!(by_code[0].id, bruno_loan.id);

    assert!(repo.list(&search("nobody")).await?.is_empty());

    Ok(())
}

/// Tests that `%` and `_` in the search term match literally.
///
/// Expected: `%` and `_` only match rows containing those characters
#[tokio::test]
async fn wildcard_characters_match_literally() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_user(db).await?;
    let plain = factory::bicycle::BicycleFactory::new(db)
        .name("Plain Commuter")
        .code("FRAME-01")
        .status("borrowed")
        .build()
        .await?;
    let tagged = factory::bicycle::BicycleFactory::new(db)
        .name("Loaner 100% Steel")
        .code("FRAME_02")
        .status("borrowed")
        .build()
        .await?;
    factory::borrowing::BorrowingFactory::new(db, student.id, plain.id)
        .build()
        .await?;
    let tagged_loan = factory::borrowing::BorrowingFactory::new(db, student.id, tagged.id)
        .build()
        .await?;

    let repo = BorrowingRepository::new(db);
    let search = |term: &str| BorrowingFilter {
        status: None,
        search: Some(term.to_string()),
    };

    let by_percent = repo.list(&search("%")).await?;
    assert_eq!(by_percent.len(), 1);
    assert_eq!(by_percent[0].id, tagged_loan.id);

    let by_underscore = repo.list(&search("FRAME_")).await?;
    assert_eq!(by_underscore.len(), 1);
    assert_eq!(by_underscore[0].id, tagged_loan.id);

    assert!(repo.list(&search("Plain_Commuter")).await?.is_empty());

    Ok(())
}
