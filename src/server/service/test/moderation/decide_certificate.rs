use super::*;

/// Tests that approving the latest certificate makes the user eligible.
///
/// Expected: Ok with decision recorded, cached flag set, eligibility granted
#[tokio::test]
async fn approval_makes_user_eligible() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let admin = factory::create_admin(db).await?;
    let student = factory::create_user(db).await?;
    let pending = factory::create_certificate(db, student.id).await?;

    let moderation = ModerationService::new(db, &locks);
    let decided = moderation
        .decide_certificate(pending.id, admin.id, CertificateDecision::Approved, Utc::now())
        .await
        .unwrap();

    assert_eq!(decided.status, CertificateStatus::Approved);
    assert_eq!(decided.decided_by, Some(admin.id));
    assert!(decided.decided_at.is_some());
    assert!(
        UserRepository::new(db)
            .find_by_id(student.id)
            .await?
            .unwrap()
            .certificate_approved
    );

    let verdict = EligibilityService::new(db, LendingPolicy::default())
        .can_borrow(student.id, Utc::now())
        .await?
        .unwrap();
    assert!(verdict.eligible);

    Ok(())
}

/// Tests that a rejection blocks subsequent borrowing.
///
/// Expected: certificate rejected; next borrow request not eligible with
/// certificate-not-approved
#[tokio::test]
async fn rejection_blocks_next_borrow() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let admin = factory::create_admin(db).await?;
    let student = factory::create_user(db).await?;
    let pending = factory::create_certificate(db, student.id).await?;
    let bicycle = factory::create_bicycle(db).await?;

    let moderation = ModerationService::new(db, &locks);
    let decided = moderation
        .decide_certificate(pending.id, admin.id, CertificateDecision::Rejected, Utc::now())
        .await
        .unwrap();
    assert_eq!(decided.status, CertificateStatus::Rejected);

    let result = AllocationService::new(db, &locks, LendingPolicy::default())
        .request_borrow(student.id, bicycle.id, Utc::now())
        .await;

    match result {
        Err(BorrowError::NotEligible(reason)) => {
            assert_eq!(reason.code(), "certificate-not-approved");
            assert_eq!(
                reason.certificate_status(),
                Some(EffectiveCertificateStatus::Rejected)
            );
        }
        other => panic!("expected not-eligible, got {other:?}"),
    }

    Ok(())
}

/// Tests that rejecting a certificate leaves an existing borrowing untouched.
///
/// Expected: open borrowing still active after rejection
#[tokio::test]
async fn rejection_does_not_cancel_open_borrowing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let admin = factory::create_admin(db).await?;
    let student = factory::create_eligible_student(db).await?;
    let (_, loan) = factory::helpers::create_open_loan(db, student.id).await?;
    let renewal = factory::medical_certificate::CertificateFactory::new(db, student.id)
        .submitted_at(Utc::now() + Duration::seconds(1))
        .build()
        .await?;

    let moderation = ModerationService::new(db, &locks);
    moderation
        .decide_certificate(renewal.id, admin.id, CertificateDecision::Rejected, Utc::now())
        .await
        .unwrap();

    assert_eq!(
        BorrowingRepository::new(db)
            .find_by_id(loan.id)
            .await?
            .unwrap()
            .status,
        BorrowingStatus::Active
    );
    assert!(
        !UserRepository::new(db)
            .find_by_id(student.id)
            .await?
            .unwrap()
            .certificate_approved
    );

    Ok(())
}

/// Tests deciding a certificate that was already decided.
///
/// Expected: Err(NotPending)
#[tokio::test]
async fn decided_certificate_is_not_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let admin = factory::create_admin(db).await?;
    let student = factory::create_user(db).await?;
    let pending = factory::create_certificate(db, student.id).await?;

    let moderation = ModerationService::new(db, &locks);
    moderation
        .decide_certificate(pending.id, admin.id, CertificateDecision::Approved, Utc::now())
        .await
        .unwrap();
    let result = moderation
        .decide_certificate(pending.id, admin.id, CertificateDecision::Rejected, Utc::now())
        .await;

    assert!(matches!(result, Err(ModerationError::NotPending(id)) if id == pending.id));
    let err = result.unwrap_err();
    assert_eq!(err.code(), "not-pending");
    assert_eq!(err.kind(), ErrorKind::Conflict);

    Ok(())
}

/// Tests two admins deciding the same certificate at once.
///
/// Expected: one decision kept, the other Err(NotPending)
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_decisions_keep_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let approver = factory::create_admin(db).await?;
    let rejecter = factory::create_admin(db).await?;
    let student = factory::create_user(db).await?;
    let pending = factory::create_certificate(db, student.id).await?;

    let handles: Vec<_> = [
        (approver.id, CertificateDecision::Approved),
        (rejecter.id, CertificateDecision::Rejected),
    ]
    .into_iter()
    .map(|(admin_id, decision)| {
        let db = db.clone();
        let locks = locks.clone();
        let certificate_id = pending.id;
        tokio::spawn(async move {
            ModerationService::new(&db, &locks)
                .decide_certificate(certificate_id, admin_id, decision, Utc::now())
                .await
        })
    })
    .collect();

    let mut kept = Vec::new();
    let mut not_pending = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(certificate) => kept.push(certificate),
            Err(ModerationError::NotPending(_)) => not_pending += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(kept.len(), 1);
    assert_eq!(not_pending, 1);

    let approved = kept[0].status == CertificateStatus::Approved;
    assert_eq!(
        UserRepository::new(db)
            .find_by_id(student.id)
            .await?
            .unwrap()
            .certificate_approved,
        approved
    );

    Ok(())
}

/// Tests that only admins may decide.
///
/// Expected: Err(Forbidden) for a student and the certificate still pending
#[tokio::test]
async fn student_is_forbidden() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let student = factory::create_user(db).await?;
    let pending = factory::create_certificate(db, student.id).await?;

    let moderation = ModerationService::new(db, &locks);
    let result = moderation
        .decide_certificate(pending.id, student.id, CertificateDecision::Approved, Utc::now())
        .await;

    assert!(matches!(result, Err(ModerationError::Forbidden(_))));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Authorization);

    let verdict = EligibilityService::new(db, LendingPolicy::default())
        .can_borrow(student.id, Utc::now())
        .await?
        .unwrap();
    assert_eq!(
        verdict.reason,
        EligibilityReason::CertificateNotApproved(EffectiveCertificateStatus::Pending)
    );

    Ok(())
}

/// Tests that a suspended admin may not decide.
///
/// Expected: Err(Forbidden) and the certificate still pending
#[tokio::test]
async fn suspended_admin_is_forbidden() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let admin = factory::user::UserFactory::new(db)
        .role("admin")
        .account_status("suspended")
        .build()
        .await?;
    let student = factory::create_user(db).await?;
    let pending = factory::create_certificate(db, student.id).await?;

    let result = ModerationService::new(db, &locks)
        .decide_certificate(pending.id, admin.id, CertificateDecision::Approved, Utc::now())
        .await;

    assert!(matches!(result, Err(ModerationError::Forbidden(id)) if id == admin.id));
    assert!(!UserRepository::new(db)
        .find_by_id(student.id)
        .await?
        .unwrap()
        .certificate_approved);

    Ok(())
}

/// Tests deciding an unknown certificate.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn unknown_certificate_is_not_found() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let admin = factory::create_admin(db).await?;

    let moderation = ModerationService::new(db, &locks);

    let result = moderation
        .decide_certificate(555, admin.id, CertificateDecision::Approved, Utc::now())
        .await;
    assert!(matches!(result, Err(ModerationError::NotFound(555))));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);

    Ok(())
}
