//! Read-only listings for the portal's borrowing and moderation tables.

use sea_orm::{DatabaseConnection, DbErr};

use crate::server::{
    data::{borrowing::BorrowingRepository, certificate::CertificateRepository},
    model::{
        borrowing::{Borrowing, BorrowingFilter},
        certificate::{CertificateFilter, MedicalCertificate},
    },
    util::parse::normalize_search,
};

pub struct QueryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> QueryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists borrowings newest-first, optionally by status and free text.
    ///
    /// Whitespace-only search text is ignored.
    ///
    /// # Returns
    /// - `Ok(Vec<Borrowing>)` - Matching borrowings
    /// - `Err(DbErr)` - Database error during query
    pub async fn list_borrowings(&self, filter: BorrowingFilter) -> Result<Vec<Borrowing>, DbErr> {
        let filter = BorrowingFilter {
            search: normalize_search(filter.search.as_deref()),
            ..filter
        };

        BorrowingRepository::new(self.db).list(&filter).await
    }

    /// Lists certificates newest-first, optionally by status and owner name or email.
    pub async fn list_certificates(
        &self,
        filter: CertificateFilter,
    ) -> Result<Vec<MedicalCertificate>, DbErr> {
        let filter = CertificateFilter {
            search: normalize_search(filter.search.as_deref()),
            ..filter
        };

        CertificateRepository::new(self.db).list(&filter).await
    }
}
