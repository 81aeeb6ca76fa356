use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "borrowing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub bicycle_id: i32,
    /// `active`, `overdue` or `returned`
    pub status: String,
    pub borrowed_at: DateTimeUtc,
    pub due_at: DateTimeUtc,
    pub returned_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::bicycle::Entity",
        from = "Column::BicycleId",
        to = "super::bicycle::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Bicycle,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::bicycle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bicycle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
