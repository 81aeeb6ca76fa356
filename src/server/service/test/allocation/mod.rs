use crate::server::{
    data::{bicycle::BicycleRepository, borrowing::BorrowingRepository},
    error::{lending::BorrowError, ErrorKind},
    model::{
        bicycle::BicycleStatus,
        borrowing::{BorrowingFilter, BorrowingStatus},
        certificate::EffectiveCertificateStatus,
        eligibility::EligibilityReason,
        policy::LendingPolicy,
    },
    service::{
        allocation::AllocationService,
        lock::{RecordKey, RecordLocks},
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use std::time::Duration as StdDuration;
use test_utils::{builder::TestBuilder, factory};
