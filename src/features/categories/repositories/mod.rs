mod category_repository;

pub use category_repository::{CategoryRepository, PgCategoryRepository};

#[cfg(test)]
pub(crate) use category_repository::not_found;
