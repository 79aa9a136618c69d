use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    #[sea_orm(column_name = "FirstName", indexed)]
    pub first_name: String,
    #[sea_orm(column_name = "Password")]
    pub password: String,
    #[sea_orm(column_name = "Email", unique)]
    pub email: String,
    #[sea_orm(column_name = "Phone", unique)]
    pub phone: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
