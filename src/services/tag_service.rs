//! Tag service - validates input, then delegates to the owner-scoped store.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{validation, Tag};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait TagService: Send + Sync {
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Tag>>;

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Tag>;

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Tag>;

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()>;
}

pub struct TagCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TagCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TagService for TagCatalog<U> {
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Tag>> {
        self.uow.tags().list(owner, assigned_only).await
    }

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Tag> {
        let name = validation::required_text("Name", &name)?;
        self.uow.tags().create(owner, name).await
    }

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Tag> {
        let name = validation::required_text("Name", &name)?;
        self.uow.tags().rename(owner, id, name).await
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        self.uow.tags().delete(owner, id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockTagRepository;
    use crate::services::testing::TestUnitOfWork;

    fn catalog(repo: MockTagRepository) -> TagCatalog<TestUnitOfWork> {
        TagCatalog::new(Arc::new(TestUnitOfWork::default().with_tags(repo)))
    }

    #[tokio::test]
    async fn test_create_tag_trims_name() {
        let owner = Uuid::new_v4();
        let mut repo = MockTagRepository::new();
        repo.expect_create()
            .with(eq(owner), eq("Vegan".to_string()))
            .times(1)
            .returning(|owner, name| Ok(Tag::new(owner, name)));

        let tag = catalog(repo)
            .create(owner, "  Vegan ".to_string())
            .await
            .unwrap();
        assert_eq!(tag.name, "Vegan");
        assert_eq!(tag.owner_id, owner);
    }

    #[tokio::test]
    async fn test_create_tag_invalid() {
        let mut repo = MockTagRepository::new();
        repo.expect_create().never();

        let err = catalog(repo)
            .create(Uuid::new_v4(), String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_passes_owner_through() {
        let owner = Uuid::new_v4();
        let mut repo = MockTagRepository::new();
        repo.expect_list()
            .with(eq(owner), eq(true))
            .returning(|owner, _| Ok(vec![Tag::new(owner, "Dessert".to_string())]));

        let tags = catalog(repo).list(owner, true).await.unwrap();
        assert_eq!(tags.len(), 1);
    }
}
