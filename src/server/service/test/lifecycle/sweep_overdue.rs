use super::*;

/// Tests that the sweep is idempotent.
///
/// Expected: first run marks the lapsed loan, second run marks nothing
#[tokio::test]
async fn second_sweep_marks_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let student = factory::create_user(db).await?;
    let (_, lapsed) = factory::helpers::create_lapsed_loan(db, student.id).await?;
    factory::helpers::create_open_loan(db, student.id).await?;

    let lifecycle = LifecycleService::new(db, &locks);
    let now = Utc::now();

    assert_eq!(lifecycle.sweep_overdue(now).await?, 1);
    assert_eq!(lifecycle.sweep_overdue(now).await?, 0);
    assert_eq!(
        BorrowingRepository::new(db)
            .find_by_id(lapsed.id)
            .await?
            .unwrap()
            .status,
        BorrowingStatus::Overdue
    );

    Ok(())
}

/// Tests return precedence: a loan returned before the sweep stays returned.
///
/// Expected: sweep count 0 and the borrowing is still returned
#[tokio::test]
async fn returned_loan_is_never_swept() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let student = factory::create_user(db).await?;
    let (_, lapsed) = factory::helpers::create_lapsed_loan(db, student.id).await?;

    let lifecycle = LifecycleService::new(db, &locks);
    lifecycle
        .return_bicycle(lapsed.id, student.id, Utc::now())
        .await
        .unwrap();

    assert_eq!(lifecycle.sweep_overdue(Utc::now()).await?, 0);
    assert_eq!(
        BorrowingRepository::new(db)
            .find_by_id(lapsed.id)
            .await?
            .unwrap()
            .status,
        BorrowingStatus::Returned
    );

    Ok(())
}

/// Tests a sweep racing a return of the same loan.
///
/// Whichever runs first, the loan ends returned and the bicycle available.
///
/// Expected: borrowing returned, bicycle available
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sweep_racing_return_ends_returned() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .with_connections(4)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let student = factory::create_user(db).await?;
    let (bicycle, lapsed) = factory::helpers::create_lapsed_loan(db, student.id).await?;

    let sweep = {
        let db = db.clone();
        let locks = locks.clone();
        tokio::spawn(async move { LifecycleService::new(&db, &locks).sweep_overdue(Utc::now()).await })
    };
    let give_back = {
        let db = db.clone();
        let locks = locks.clone();
        let (loan_id, user_id) = (lapsed.id, student.id);
        tokio::spawn(async move {
            LifecycleService::new(&db, &locks)
                .return_bicycle(loan_id, user_id, Utc::now())
                .await
        })
    };

    sweep.await.unwrap()?;
    assert!(give_back.await.unwrap().is_ok());

    assert_eq!(
        BorrowingRepository::new(db)
            .find_by_id(lapsed.id)
            .await?
            .unwrap()
            .status,
        BorrowingStatus::Returned
    );
    assert_eq!(
        BicycleRepository::new(db)
            .find_by_id(bicycle.id)
            .await?
            .unwrap()
            .status,
        BicycleStatus::Available
    );

    Ok(())
}
