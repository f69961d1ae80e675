//! In-process store implementing every repository trait.
//!
//! Same ownership, ordering and conflict rules as the SeaORM stores, kept
//! behind a single `RwLock`. Names compare case-insensitively first, close to
//! PostgreSQL's default locale collation (`apple` < `Banana` < `cherry`). Used by the router tests and for running the
//! server without PostgreSQL.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{IdentityRepository, IngredientRepository, RecipeRepository, TagRepository};
use crate::domain::{Identity, Ingredient, NewRecipe, Recipe, RecipeChanges, RecipeFilter, Tag};
use crate::errors::{AppError, AppResult};

/// Case-insensitive order, ties broken by the exact bytes.
fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Default)]
struct MemoryState {
    identities: HashMap<Uuid, Identity>,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
    /// Insertion order
    recipes: Vec<Recipe>,
}

/// Shared in-memory storage. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Identity>> {
        Ok(self.state.read().await.identities.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let state = self.state.read().await;
        Ok(state
            .identities
            .values()
            .find(|identity| identity.email == email)
            .cloned())
    }

    async fn insert(&self, identity: Identity) -> AppResult<Identity> {
        let mut state = self.state.write().await;
        if state.identities.values().any(|i| i.email == identity.email) {
            return Err(AppError::conflict("Email"));
        }
        state.identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn update(&self, identity: Identity) -> AppResult<Identity> {
        let mut state = self.state.write().await;
        if state
            .identities
            .values()
            .any(|i| i.email == identity.email && i.id != identity.id)
        {
            return Err(AppError::conflict("Email"));
        }
        let slot = state.identities.get_mut(&identity.id).ok_or(AppError::NotFound)?;
        *slot = identity.clone();
        Ok(identity)
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Tag>> {
        let state = self.state.read().await;
        let mut tags: Vec<Tag> = state
            .tags
            .iter()
            .filter(|tag| tag.owner_id == owner)
            .filter(|tag| !assigned_only || state.recipes.iter().any(|r| r.tags.contains(&tag.id)))
            .cloned()
            .collect();
        tags.sort_by(|a, b| by_name(&b.name, &a.name));
        Ok(tags)
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Tag>> {
        let state = self.state.read().await;
        Ok(state
            .tags
            .iter()
            .find(|tag| tag.id == id && tag.owner_id == owner)
            .cloned())
    }

    async fn find_many(&self, owner: Uuid, ids: Vec<Uuid>) -> AppResult<Vec<Tag>> {
        let state = self.state.read().await;
        let mut tags: Vec<Tag> = state
            .tags
            .iter()
            .filter(|tag| tag.owner_id == owner && ids.contains(&tag.id))
            .cloned()
            .collect();
        tags.sort_by(|a, b| by_name(&a.name, &b.name));
        Ok(tags)
    }

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Tag> {
        let tag = Tag::new(owner, name);
        self.state.write().await.tags.push(tag.clone());
        Ok(tag)
    }

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Tag> {
        let mut state = self.state.write().await;
        let tag = state
            .tags
            .iter_mut()
            .find(|tag| tag.id == id && tag.owner_id == owner)
            .ok_or(AppError::NotFound)?;
        tag.name = name;
        Ok(tag.clone())
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        let before = state.tags.len();
        state.tags.retain(|tag| !(tag.id == id && tag.owner_id == owner));
        if state.tags.len() == before {
            return Err(AppError::NotFound);
        }
        for recipe in &mut state.recipes {
            recipe.tags.retain(|tag_id| *tag_id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl IngredientRepository for MemoryStore {
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Ingredient>> {
        let state = self.state.read().await;
        let mut ingredients: Vec<Ingredient> = state
            .ingredients
            .iter()
            .filter(|ingredient| ingredient.owner_id == owner)
            .filter(|ingredient| {
                !assigned_only
                    || state
                        .recipes
                        .iter()
                        .any(|r| r.ingredients.contains(&ingredient.id))
            })
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| by_name(&b.name, &a.name));
        Ok(ingredients)
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Ingredient>> {
        let state = self.state.read().await;
        Ok(state
            .ingredients
            .iter()
            .find(|ingredient| ingredient.id == id && ingredient.owner_id == owner)
            .cloned())
    }

    async fn find_many(&self, owner: Uuid, ids: Vec<Uuid>) -> AppResult<Vec<Ingredient>> {
        let state = self.state.read().await;
        let mut ingredients: Vec<Ingredient> = state
            .ingredients
            .iter()
            .filter(|ingredient| ingredient.owner_id == owner && ids.contains(&ingredient.id))
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| by_name(&a.name, &b.name));
        Ok(ingredients)
    }

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Ingredient> {
        let ingredient = Ingredient::new(owner, name);
        self.state.write().await.ingredients.push(ingredient.clone());
        Ok(ingredient)
    }

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Ingredient> {
        let mut state = self.state.write().await;
        let ingredient = state
            .ingredients
            .iter_mut()
            .find(|ingredient| ingredient.id == id && ingredient.owner_id == owner)
            .ok_or(AppError::NotFound)?;
        ingredient.name = name;
        Ok(ingredient.clone())
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        let before = state.ingredients.len();
        state
            .ingredients
            .retain(|ingredient| !(ingredient.id == id && ingredient.owner_id == owner));
        if state.ingredients.len() == before {
            return Err(AppError::NotFound);
        }
        for recipe in &mut state.recipes {
            recipe.ingredients.retain(|ingredient_id| *ingredient_id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn list(&self, owner: Uuid, filter: RecipeFilter) -> AppResult<Vec<Recipe>> {
        let state = self.state.read().await;
        // Newest insert first among equal timestamps
        let mut recipes: Vec<Recipe> = state
            .recipes
            .iter()
            .rev()
            .filter(|recipe| recipe.owner_id == owner && filter.matches(recipe))
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Recipe>> {
        let state = self.state.read().await;
        Ok(state
            .recipes
            .iter()
            .find(|recipe| recipe.id == id && recipe.owner_id == owner)
            .cloned())
    }

    async fn create(&self, owner: Uuid, draft: NewRecipe) -> AppResult<Recipe> {
        let recipe = Recipe::new(owner, draft);
        self.state.write().await.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, owner: Uuid, id: Uuid, changes: RecipeChanges) -> AppResult<Recipe> {
        let mut state = self.state.write().await;
        let recipe = state
            .recipes
            .iter_mut()
            .find(|recipe| recipe.id == id && recipe.owner_id == owner)
            .ok_or(AppError::NotFound)?;
        recipe.apply(changes);
        Ok(recipe.clone())
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        let before = state.recipes.len();
        state
            .recipes
            .retain(|recipe| !(recipe.id == id && recipe.owner_id == owner));
        if state.recipes.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
