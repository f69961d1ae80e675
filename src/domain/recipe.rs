//! Recipe domain entity and its change sets.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Ingredient, IngredientResponse, Tag, TagResponse};

/// A user's recipe with its tag and ingredient references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Uuid,
    /// Owning identity
    pub owner_id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    /// External link, empty when not set
    pub link: String,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(owner_id: Uuid, draft: NewRecipe) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: draft.title,
            time_minutes: draft.time_minutes,
            price: draft.price,
            link: draft.link,
            tags: dedup(draft.tags),
            ingredients: dedup(draft.ingredients),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, changes: RecipeChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(time_minutes) = changes.time_minutes {
            self.time_minutes = time_minutes;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(link) = changes.link {
            self.link = link;
        }
        if let Some(tags) = changes.tags {
            self.tags = dedup(tags);
        }
        if let Some(ingredients) = changes.ingredients {
            self.ingredients = dedup(ingredients);
        }
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Recipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// Drop repeated ids while keeping first-seen order.
pub(crate) fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Validated fields for a new recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<Uuid>,
}

/// Partial update; `None` leaves a field untouched, `Some` replaces it
/// (for tags and ingredients the whole set is replaced).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub link: Option<String>,
    pub tags: Option<Vec<Uuid>>,
    pub ingredients: Option<Vec<Uuid>>,
}

impl From<NewRecipe> for RecipeChanges {
    fn from(draft: NewRecipe) -> Self {
        Self {
            title: Some(draft.title),
            time_minutes: Some(draft.time_minutes),
            price: Some(draft.price),
            link: Some(draft.link),
            tags: Some(draft.tags),
            ingredients: Some(draft.ingredients),
        }
    }
}

/// Listing filter. Empty lists do not filter; a non-empty list keeps
/// recipes referencing at least one of the given ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<Uuid>,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let any = |wanted: &[Uuid], present: &[Uuid]| {
            wanted.is_empty() || wanted.iter().any(|id| present.contains(id))
        };
        any(&self.tags, &recipe.tags) && any(&self.ingredients, &recipe.ingredients)
    }
}

/// Recipe with its tags and ingredients resolved.
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

/// Recipe as returned by list / create / update
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    #[schema(example = "Chocolate cheesecake")]
    pub title: String,
    #[schema(example = 30)]
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.00")]
    pub price: Decimal,
    #[schema(example = "https://example.com/cheesecake")]
    pub link: String,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<Uuid>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            tags: recipe.tags,
            ingredients: recipe.ingredients,
        }
    }
}

/// Recipe detail with nested tags and ingredients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetailResponse {
    pub id: Uuid,
    #[schema(example = "Chocolate cheesecake")]
    pub title: String,
    #[schema(example = 30)]
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.00")]
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<TagResponse>,
    pub ingredients: Vec<IngredientResponse>,
}

impl From<RecipeDetail> for RecipeDetailResponse {
    fn from(detail: RecipeDetail) -> Self {
        let RecipeDetail {
            recipe,
            tags,
            ingredients,
        } = detail;
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            tags: tags.into_iter().map(TagResponse::from).collect(),
            ingredients: ingredients.into_iter().map(IngredientResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewRecipe {
        NewRecipe {
            title: "Steak and mushroom sauce".to_string(),
            time_minutes: 5,
            price: Decimal::new(500, 2),
            link: String::new(),
            tags: vec![],
            ingredients: vec![],
        }
    }

    #[test]
    fn test_recipe_str() {
        let recipe = Recipe::new(Uuid::new_v4(), draft());
        assert_eq!(recipe.to_string(), recipe.title);
    }

    #[test]
    fn test_new_recipe_drops_duplicate_references() {
        let tag = Uuid::new_v4();
        let recipe = Recipe::new(
            Uuid::new_v4(),
            NewRecipe {
                tags: vec![tag, tag],
                ..draft()
            },
        );
        assert_eq!(recipe.tags, vec![tag]);
    }

    #[test]
    fn test_apply_partial_changes() {
        let tag = Uuid::new_v4();
        let mut recipe = Recipe::new(Uuid::new_v4(), draft());
        recipe.apply(RecipeChanges {
            title: Some("Chicken tikka".to_string()),
            tags: Some(vec![tag]),
            ..RecipeChanges::default()
        });

        assert_eq!(recipe.title, "Chicken tikka");
        assert_eq!(recipe.time_minutes, 5);
        assert_eq!(recipe.price, Decimal::new(500, 2));
        assert_eq!(recipe.tags, vec![tag]);
    }

    #[test]
    fn test_full_changes_clear_references() {
        let mut recipe = Recipe::new(
            Uuid::new_v4(),
            NewRecipe {
                tags: vec![Uuid::new_v4()],
                ..draft()
            },
        );
        recipe.apply(RecipeChanges::from(draft()));
        assert!(recipe.tags.is_empty());
    }

    #[test]
    fn test_filter_matches_any_listed_id() {
        let vegan = Uuid::new_v4();
        let dessert = Uuid::new_v4();
        let tahini = Uuid::new_v4();
        let recipe = Recipe::new(
            Uuid::new_v4(),
            NewRecipe {
                tags: vec![vegan],
                ingredients: vec![tahini],
                ..draft()
            },
        );

        assert!(RecipeFilter::default().matches(&recipe));
        assert!(RecipeFilter {
            tags: vec![dessert, vegan],
            ingredients: vec![],
        }
        .matches(&recipe));
        assert!(!RecipeFilter {
            tags: vec![dessert],
            ingredients: vec![],
        }
        .matches(&recipe));
        assert!(!RecipeFilter {
            tags: vec![vegan],
            ingredients: vec![Uuid::new_v4()],
        }
        .matches(&recipe));
    }

    #[test]
    fn test_price_serializes_as_string() {
        let recipe = Recipe::new(Uuid::new_v4(), draft());
        let json = serde_json::to_value(RecipeResponse::from(recipe)).unwrap();
        assert_eq!(json["price"], "5.00");
    }
}
