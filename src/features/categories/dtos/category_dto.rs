use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::categories::models::{Category, NewCategory};

/// Minimum number of characters in a category name
pub const MIN_NAME_LENGTH: usize = 3;

/// Name must be non-empty and at least `MIN_NAME_LENGTH` characters long
fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::Borrowed("category name must not be empty"));
        return Err(err);
    }

    if name.chars().count() < MIN_NAME_LENGTH {
        let mut err = ValidationError::new("length");
        err.message = Some(Cow::Owned(format!(
            "category name must be at least {} characters",
            MIN_NAME_LENGTH
        )));
        return Err(err);
    }

    Ok(())
}

// Create request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(custom(function = "validate_category_name"))]
    #[serde(default)]
    #[schema(min_length = 3, example = "Fruits")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "Fresh fruit")]
    pub description: Option<String>,
}

// Update request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(custom(function = "validate_category_name"))]
    #[serde(default)]
    #[schema(min_length = 3, example = "Vegetables")]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateCategoryDto> for NewCategory {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
