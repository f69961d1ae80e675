//! Service Container - Centralized service access.
//!
//! Handlers depend on the service traits only; the container decides
//! which implementations and which storage back them.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, IdentityManager, IdentityService, IngredientCatalog,
    IngredientService, RecipeBook, RecipeService, TagCatalog, TagService,
};
use crate::config::Config;
use crate::infra::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn identities(&self) -> Arc<dyn IdentityService>;

    fn tags(&self) -> Arc<dyn TagService>;

    fn ingredients(&self) -> Arc<dyn IngredientService>;

    fn recipes(&self) -> Arc<dyn RecipeService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    identity_service: Arc<dyn IdentityService>,
    tag_service: Arc<dyn TagService>,
    ingredient_service: Arc<dyn IngredientService>,
    recipe_service: Arc<dyn RecipeService>,
}

impl Services {
    /// Wire every service to the same Unit of Work.
    pub fn from_unit_of_work<U: UnitOfWork>(uow: Arc<U>, config: Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            identity_service: Arc::new(IdentityManager::new(uow.clone())),
            tag_service: Arc::new(TagCatalog::new(uow.clone())),
            ingredient_service: Arc::new(IngredientCatalog::new(uow.clone())),
            recipe_service: Arc::new(RecipeBook::new(uow)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn identities(&self) -> Arc<dyn IdentityService> {
        self.identity_service.clone()
    }

    fn tags(&self) -> Arc<dyn TagService> {
        self.tag_service.clone()
    }

    fn ingredients(&self) -> Arc<dyn IngredientService> {
        self.ingredient_service.clone()
    }

    fn recipes(&self) -> Arc<dyn RecipeService> {
        self.recipe_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewIdentity;
    use crate::infra::MemoryStore;
    use crate::services::testing::test_config;

    #[tokio::test]
    async fn test_services_share_one_store() {
        let services = Services::from_unit_of_work(Arc::new(MemoryStore::new()), test_config());

        let identity = services
            .identities()
            .create_user(Some("cook@example.com"), Some("test123"), NewIdentity::default())
            .await
            .unwrap();
        let token = services
            .auth()
            .login("cook@example.com".to_string(), "test123".to_string())
            .await
            .unwrap();

        let claims = services.auth().verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, identity.id);
        assert!(services.identities().get(identity.id).await.unwrap().last_login.is_some());
    }
}
