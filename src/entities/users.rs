use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name shown on every page
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub name: String,

    /// Login handle; unset until the admin command assigns credentials
    #[sea_orm(unique, column_type = "String(StringLen::N(20))")]
    pub username: Option<String>,

    /// Argon2id password hash
    #[sea_orm(column_type = "String(StringLen::N(128))")]
    pub password_hash: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
