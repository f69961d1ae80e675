//! Ingredient database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Ingredient;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Ingredient {
    fn from(model: Model) -> Self {
        Ingredient {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
