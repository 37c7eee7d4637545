use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{parse_id, AppJson, AppPath};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, ErrorResponse};

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 500, description = "Failed to fetch categories", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    tracing::debug!("list_categories called");
    let categories = service.get_all().await?;
    Ok(Json(ApiResponse::list(categories)))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Invalid category ID", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Failed to fetch category", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    tracing::debug!(id = %id, "get_category called");
    let id = parse_id(&id)?;
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(category)))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Malformed body or validation error", body = ErrorResponse),
        (status = 500, description = "Failed to save category", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    tracing::debug!("create_category called");
    let category = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(category))))
}

/// Update a category's name and description
#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Invalid ID, malformed body or validation error", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Failed to update category", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<String>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    tracing::debug!(id = %id, "update_category called");
    let id = parse_id(&id)?;
    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(category)))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 400, description = "Invalid category ID", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Failed to delete category", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<()>>> {
    tracing::debug!(id = %id, "delete_category called");
    let id = parse_id(&id)?;
    service.delete(id).await?;
    Ok(Json(ApiResponse::message("Category deleted successfully")))
}
