use super::*;

/// Tests that an identity-service suspension is mirrored and blocks borrowing.
///
/// Expected: Ok with suspended account; eligibility account-suspended-or-pending
#[tokio::test]
async fn mirrored_suspension_blocks_borrowing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_eligible_student(db).await?;

    let service = UserService::new(db, LendingPolicy::default());
    let updated = service
        .upsert_user(
            UpsertUserParam {
                email: student.email.clone(),
                name: student.name.clone(),
                role: Role::Student,
                account_status: AccountStatus::Suspended,
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(updated.id, student.id);
    assert_eq!(updated.account_status, AccountStatus::Suspended);

    let verdict = service.can_borrow(student.id, Utc::now()).await?.unwrap();
    assert_eq!(verdict.reason, EligibilityReason::AccountSuspendedOrPending);

    Ok(())
}

/// Tests creating a first-time user through the service.
///
/// Expected: Ok and retrievable by id
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = UserService::new(db, LendingPolicy::default());
    let created = service
        .upsert_user(
            UpsertUserParam {
                email: "desk@campus.test".to_string(),
                name: "Front Desk".to_string(),
                role: Role::Admin,
                account_status: AccountStatus::Active,
            },
            Utc::now(),
        )
        .await?;

    let fetched = service.get_user(created.id).await?.unwrap();
    assert!(fetched.is_admin());
    assert_eq!(fetched.email, "desk@campus.test");

    Ok(())
}
