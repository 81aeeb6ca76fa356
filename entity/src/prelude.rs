pub use super::bicycle::Entity as Bicycle;
pub use super::borrowing::Entity as Borrowing;
pub use super::medical_certificate::Entity as MedicalCertificate;
pub use super::user::Entity as User;
