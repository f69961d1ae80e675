//! Recipe database entity for SeaORM.
//!
//! Tag and ingredient references live in the `recipe_tags` and
//! `recipe_ingredients` link tables.

use sea_orm::entity::prelude::*;

use crate::domain::Recipe;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub price: Decimal,
    pub link: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Domain recipe with already loaded references.
    pub fn into_recipe(self, tags: Vec<Uuid>, ingredients: Vec<Uuid>) -> Recipe {
        Recipe {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            time_minutes: self.time_minutes,
            price: self.price,
            link: self.link,
            tags,
            ingredients,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
