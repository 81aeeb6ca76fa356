use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bicycle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Frame tag painted on the bicycle.
    #[sea_orm(unique)]
    pub code: String,
    /// `available`, `borrowed` or `maintenance`
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::borrowing::Entity")]
    Borrowing,
}

impl Related<super::borrowing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
