use sea_orm::entity::prelude::*;

/// Local mirror of an identity-service user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    /// `student` or `admin`
    pub role: String,
    /// `active`, `suspended` or `pending`
    pub account_status: String,
    /// Display cache of "latest certificate is approved".
    pub certificate_approved: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::borrowing::Entity")]
    Borrowing,
    #[sea_orm(has_many = "super::medical_certificate::Entity")]
    MedicalCertificate,
}

impl Related<super::borrowing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowing.def()
    }
}

impl Related<super::medical_certificate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MedicalCertificate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
