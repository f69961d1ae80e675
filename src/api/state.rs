//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, IdentityService, IngredientService, RecipeService, ServiceContainer, Services,
    TagService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub identity_service: Arc<dyn IdentityService>,
    pub tag_service: Arc<dyn TagService>,
    pub ingredient_service: Arc<dyn IngredientService>,
    pub recipe_service: Arc<dyn RecipeService>,
    /// Database connection, absent when running on the in-memory store
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state backed by PostgreSQL.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::new(&services, Some(database))
    }

    /// Create application state from any service container.
    pub fn new(services: &dyn ServiceContainer, database: Option<Arc<Database>>) -> Self {
        Self {
            auth_service: services.auth(),
            identity_service: services.identities(),
            tag_service: services.tags(),
            ingredient_service: services.ingredients(),
            recipe_service: services.recipes(),
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryStore;
    use crate::services::testing::test_config;
    use crate::services::MockServiceContainer;

    #[test]
    fn test_state_takes_every_service_from_container() {
        let services = Services::from_unit_of_work(Arc::new(MemoryStore::new()), test_config());

        let mut container = MockServiceContainer::new();
        let auth = services.auth();
        container.expect_auth().times(1).returning(move || auth.clone());
        let identities = services.identities();
        container
            .expect_identities()
            .times(1)
            .returning(move || identities.clone());
        let tags = services.tags();
        container.expect_tags().times(1).returning(move || tags.clone());
        let ingredients = services.ingredients();
        container
            .expect_ingredients()
            .times(1)
            .returning(move || ingredients.clone());
        let recipes = services.recipes();
        container
            .expect_recipes()
            .times(1)
            .returning(move || recipes.clone());

        let state = AppState::new(&container, None);
        assert!(state.database.is_none());
    }
}
