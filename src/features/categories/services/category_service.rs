use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Layer, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::NewCategory;
use crate::features::categories::repositories::CategoryRepository;

/// Reject non-positive ids before any storage access
fn ensure_valid_id(id: i32) -> Result<()> {
    if id <= 0 {
        tracing::warn!(layer = %Layer::Service, id, "Invalid category ID");
        return Err(AppError::Validation(format!(
            "Category ID must be a positive integer, got {}",
            id
        ))
        .context(Layer::Service, "Invalid category ID"));
    }
    Ok(())
}

fn ensure_valid<T: Validate>(dto: &T) -> Result<()> {
    dto.validate().map_err(|e| {
        tracing::warn!(layer = %Layer::Service, "Category validation failed: {}", e);
        AppError::Validation(e.to_string()).context(Layer::Service, "Invalid category data")
    })
}

/// Wrap a lower-layer failure with service context, logging it on the way up
fn wrap(e: AppError, message: &str) -> AppError {
    let kind = e.kind();
    if kind.is_client_error() {
        tracing::warn!(layer = %Layer::Service, kind = ?kind, "{}: {}", message, e);
    } else {
        tracing::error!(layer = %Layer::Service, kind = ?kind, "{}: {}", message, e);
    }
    e.context(Layer::Service, message)
}

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// List all categories
    pub async fn get_all(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self
            .repository
            .find_all()
            .await
            .map_err(|e| wrap(e, "Failed to fetch categories"))?;

        Ok(categories.into_iter().map(CategoryResponseDto::from).collect())
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> Result<CategoryResponseDto> {
        ensure_valid_id(id)?;

        let category = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| wrap(e, "Failed to fetch category"))?;

        Ok(category.into())
    }

    /// Create a new category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        ensure_valid(&dto)?;

        let new_category = NewCategory::from(dto);
        let category = self
            .repository
            .create(&new_category)
            .await
            .map_err(|e| wrap(e, "Failed to save category"))?;

        tracing::info!(layer = %Layer::Service, id = category.id, "Category created");
        Ok(category.into())
    }

    /// Update name and description of an existing category.
    ///
    /// Returns the in-memory entity after the write; `updated_at` reflects the
    /// value loaded before the update.
    pub async fn update(&self, id: i32, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        ensure_valid_id(id)?;
        ensure_valid(&dto)?;

        let mut category = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| wrap(e, "Category not found for update"))?;

        category.name = dto.name;
        category.description = dto.description;

        self.repository
            .update(id, &category)
            .await
            .map_err(|e| wrap(e, "Failed to update category"))?;

        tracing::info!(layer = %Layer::Service, id, "Category updated");
        Ok(category.into())
    }

    /// Delete a category (hard delete)
    pub async fn delete(&self, id: i32) -> Result<()> {
        ensure_valid_id(id)?;

        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| wrap(e, "Category not found for delete"))?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| wrap(e, "Failed to delete category"))?;

        tracing::info!(layer = %Layer::Service, id, "Category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::shared::test_helpers::{in_memory_service, InMemoryCategoryRepository};
    use fake::faker::lorem::en::{Sentence, Word};
    use fake::Fake;
    use tokio_test::{assert_err, assert_ok};

    fn create_dto(name: &str, description: Option<&str>) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn update_dto(name: &str, description: Option<&str>) -> UpdateCategoryDto {
        UpdateCategoryDto {
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_get_all_empty_returns_empty_list() {
        let (service, _) = in_memory_service(InMemoryCategoryRepository::new());
        let categories = assert_ok!(service.get_all().await);
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_returns_rows_in_id_order() {
        let (service, _) =
            in_memory_service(InMemoryCategoryRepository::with_categories(&["Fruits", "Drinks"]));
        let categories = service.get_all().await.unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Fruits", "Drinks"]);
        assert!(categories[0].id < categories[1].id);
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let (service, _) = in_memory_service(InMemoryCategoryRepository::new());

        for _ in 0..5 {
            let name: String = Sentence(1..3).fake();
            let description: String = Sentence(3..8).fake();
            let dto = create_dto(&format!("{} category", name), Some(&description));

            let created = service.create(dto.clone()).await.unwrap();
            assert!(created.id > 0);
            assert_eq!(created.name, dto.name);
            assert_eq!(created.description, dto.description);
            assert!(created.updated_at >= created.created_at);
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (service, _) = in_memory_service(InMemoryCategoryRepository::new());
        let word: String = Word().fake();
        let dto = create_dto(&format!("{}-items", word), Some("Fresh fruit"));

        let created = service.create(dto.clone()).await.unwrap();
        let loaded = service.get_by_id(created.id).await.unwrap();

        assert_eq!(loaded.name, dto.name);
        assert_eq!(loaded.description, dto.description);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_name_without_writing() {
        let (service, repo) = in_memory_service(InMemoryCategoryRepository::new());

        for name in ["", "a", "Fr"] {
            let err = assert_err!(service.create(create_dto(name, None)).await);
            assert_eq!(err.kind(), ErrorKind::InvalidData, "name {:?}", name);
        }

        assert_eq!(repo.calls(), 0);
        assert_eq!(repo.row_count(), 0);
    }

    #[tokio::test]
    async fn test_non_positive_ids_never_reach_storage() {
        let (service, repo) =
            in_memory_service(InMemoryCategoryRepository::with_categories(&["Fruits"]));

        for id in [0, -1, i32::MIN] {
            assert_eq!(
                service.get_by_id(id).await.unwrap_err().kind(),
                ErrorKind::InvalidData
            );
            assert_eq!(
                service
                    .update(id, update_dto("Valid name", None))
                    .await
                    .unwrap_err()
                    .kind(),
                ErrorKind::InvalidData
            );
            assert_eq!(
                service.delete(id).await.unwrap_err().kind(),
                ErrorKind::InvalidData
            );
        }

        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let (service, repo) = in_memory_service(InMemoryCategoryRepository::new());

        let err = service.get_by_id(9999).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = service
            .update(9999, update_dto("Vegetables", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = service.delete(9999).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // The existence check stops update/delete before any write
        assert_eq!(repo.writes(), 0);
    }

    #[test]
    fn test_wrap_keeps_kind_and_marks_service_layer() {
        let not_found = wrap(
            AppError::NotFound("Category with id 3 not found".to_string()),
            "Failed to fetch category",
        );
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert!(not_found.kind().is_client_error());
        assert_eq!(not_found.layer(), Some(Layer::Service));

        let storage = wrap(
            AppError::Database(sqlx::Error::PoolClosed),
            "Failed to fetch categories",
        );
        assert_eq!(storage.kind(), ErrorKind::Storage);
        assert!(!storage.kind().is_client_error());
    }

    #[tokio::test]
    async fn test_update_overwrites_name_and_description() {
        let (service, _) =
            in_memory_service(InMemoryCategoryRepository::with_categories(&["Fruits"]));

        let updated = service
            .update(1, update_dto("Vegetables", Some("Green things")))
            .await
            .unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Vegetables");
        assert_eq!(updated.description.as_deref(), Some("Green things"));

        let loaded = service.get_by_id(1).await.unwrap();
        assert_eq!(loaded.name, "Vegetables");
        assert_eq!(loaded.created_at, updated.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_short_name_without_writing() {
        let (service, repo) =
            in_memory_service(InMemoryCategoryRepository::with_categories(&["Fruits"]));

        let err = service.update(1, update_dto("Fr", None)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(repo.writes(), 0);
        assert_eq!(service.get_by_id(1).await.unwrap().name, "Fruits");
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let (service, repo) =
            in_memory_service(InMemoryCategoryRepository::with_categories(&["Fruits"]));

        assert_ok!(service.delete(1).await);
        assert_eq!(repo.row_count(), 0);

        let err = service.delete(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_storage_failures_keep_storage_kind() {
        let (service, repo) =
            in_memory_service(InMemoryCategoryRepository::with_categories(&["Fruits"]));
        repo.fail_storage(true);

        let err = service.get_all().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(err.layer(), Some(Layer::Service));

        let err = service
            .create(create_dto("Drinks", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);

        let err = service.delete(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
