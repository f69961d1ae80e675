//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Identity, Password, Permissions};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Identity {
    fn from(model: Model) -> Self {
        Identity {
            id: model.id,
            email: model.email,
            name: model.name,
            is_active: model.is_active,
            permissions: Permissions {
                is_staff: model.is_staff,
                is_superuser: model.is_superuser,
            },
            password: Password::from_hash(model.password_hash),
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Every column set, for both insert and full update.
impl From<Identity> for ActiveModel {
    fn from(identity: Identity) -> Self {
        ActiveModel {
            id: Set(identity.id),
            email: Set(identity.email),
            password_hash: Set(identity.password.into_string()),
            name: Set(identity.name),
            is_active: Set(identity.is_active),
            is_staff: Set(identity.permissions.is_staff),
            is_superuser: Set(identity.permissions.is_superuser),
            last_login: Set(identity.last_login),
            created_at: Set(identity.created_at),
            updated_at: Set(identity.updated_at),
        }
    }
}
