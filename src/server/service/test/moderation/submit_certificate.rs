use super::*;

/// Tests that a freshly submitted certificate leaves the user ineligible as pending.
///
/// Expected: Ok with pending certificate; eligibility reason certificate-not-approved(pending)
#[tokio::test]
async fn pending_submission_is_not_approved() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let student = factory::create_user(db).await?;

    let moderation = ModerationService::new(db, &locks);
    let certificate = moderation
        .submit_certificate(
            SubmitCertificateParam {
                user_id: student.id,
                document_ref: "uploads/cert-1.pdf".to_string(),
            },
            Utc::now(),
        )
        .await
        .unwrap();

    assert_eq!(certificate.status, CertificateStatus::Pending);

    let verdict = EligibilityService::new(db, LendingPolicy::default())
        .can_borrow(student.id, Utc::now())
        .await?
        .unwrap();
    assert!(!verdict.eligible);
    assert_eq!(
        verdict.reason,
        EligibilityReason::CertificateNotApproved(EffectiveCertificateStatus::Pending)
    );

    Ok(())
}

/// Tests that resubmitting supersedes an approval and clears the cached flag.
///
/// Expected: cached flag false, eligibility pending
#[tokio::test]
async fn resubmission_supersedes_approval() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let student = factory::create_eligible_student(db).await?;

    let moderation = ModerationService::new(db, &locks);
    moderation
        .submit_certificate(
            SubmitCertificateParam {
                user_id: student.id,
                document_ref: "uploads/renewal.pdf".to_string(),
            },
            Utc::now() + Duration::seconds(1),
        )
        .await
        .unwrap();

    let user = UserRepository::new(db).find_by_id(student.id).await?.unwrap();
    assert!(!user.certificate_approved);

    let verdict = EligibilityService::new(db, LendingPolicy::default())
        .can_borrow(student.id, Utc::now())
        .await?
        .unwrap();
    assert_eq!(
        verdict.reason.certificate_status(),
        Some(EffectiveCertificateStatus::Pending)
    );

    Ok(())
}

/// Tests submission validation.
///
/// Expected: Err(Validation) for a blank reference, Err(UserNotFound) for an unknown user
#[tokio::test]
async fn rejects_blank_reference_and_unknown_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_lending_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = RecordLocks::new();

    let student = factory::create_user(db).await?;

    let moderation = ModerationService::new(db, &locks);

    let blank = moderation
        .submit_certificate(
            SubmitCertificateParam {
                user_id: student.id,
                document_ref: "   ".to_string(),
            },
            Utc::now(),
        )
        .await;
    assert!(matches!(blank, Err(ModerationError::Validation(_))));

    let unknown = moderation
        .submit_certificate(
            SubmitCertificateParam {
                user_id: 31337,
                document_ref: "uploads/x.pdf".to_string(),
            },
            Utc::now(),
        )
        .await;
    assert!(matches!(unknown, Err(ModerationError::UserNotFound(31337))));

    Ok(())
}
