//! User factory for creating test user entities.

use crate::factory::{helpers::next_id, medical_certificate::CertificateFactory};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let admin = UserFactory::new(&db)
///     .name("Desk Admin")
///     .role("admin")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    name: String,
    role: String,
    account_status: String,
    certificate_approved: bool,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - email: `"user{id}@campus.test"`
    /// - name: `"User {id}"`
    /// - role: `"student"`
    /// - account_status: `"active"`
    /// - certificate_approved: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("user{}@campus.test", id),
            name: format!("User {}", id),
            role: "student".to_string(),
            account_status: "active".to_string(),
            certificate_approved: false,
        }
    }

    /// Sets the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the role (`student` or `admin`).
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the account status (`active`, `suspended` or `pending`).
    pub fn account_status(mut self, status: impl Into<String>) -> Self {
        self.account_status = status.into();
        self
    }

    /// Sets the cached certificate flag without creating a certificate row.
    pub fn certificate_approved(mut self, approved: bool) -> Self {
        self.certificate_approved = approved;
        self
    }

    /// Builds and inserts the user entity into the database.
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            email: ActiveValue::Set(self.email),
            name: ActiveValue::Set(self.name),
            role: ActiveValue::Set(self.role),
            account_status: ActiveValue::Set(self.account_status),
            certificate_approved: ActiveValue::Set(self.certificate_approved),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active student with no certificate.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates an active admin.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role("admin").build().await
}

/// Creates an active student whose latest certificate is approved.
///
/// # Returns
/// - `Ok(entity::user::Model)` - Created user (cached flag set to true)
/// - `Err(DbErr)` - Database error during insert
pub async fn create_eligible_student(
    db: &DatabaseConnection,
) -> Result<entity::user::Model, DbErr> {
    let user = UserFactory::new(db).certificate_approved(true).build().await?;
    CertificateFactory::new(db, user.id)
        .status("approved")
        .build()
        .await?;

    Ok(user)
}
