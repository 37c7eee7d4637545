use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, NewCategory};
use crate::features::categories::repositories::{not_found, CategoryRepository};
use crate::features::categories::{routes, CategoryService};

#[derive(Default)]
struct Table {
    rows: Vec<Category>,
    next_id: i32,
}

/// In-memory `CategoryRepository` that mirrors the SQL semantics of the
/// PostgreSQL implementation and records how often storage was touched.
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    table: Mutex<Table>,
    fail_storage: AtomicBool,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows directly, bypassing validation and the counters
    pub fn with_categories(names: &[&str]) -> Self {
        let repo = Self::new();
        {
            let mut table = repo.table.lock().unwrap();
            for name in names {
                table.next_id += 1;
                let now = Utc::now();
                let row = Category {
                    id: table.next_id,
                    name: name.to_string(),
                    description: None,
                    created_at: now,
                    updated_at: now,
                };
                table.rows.push(row);
            }
        }
        repo
    }

    /// Make every subsequent call fail with a database error
    pub fn fail_storage(&self, fail: bool) {
        self.fail_storage.store(fail, Ordering::SeqCst);
    }

    /// Total number of repository calls
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of create/update/delete calls
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn row_count(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }

    fn enter(&self, write: bool) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if write {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        if self.fail_storage.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>> {
        self.enter(false)?;
        let table = self.table.lock().unwrap();
        let mut rows = table.rows.clone();
        rows.sort_by_key(|c| c.id);
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Category> {
        self.enter(false)?;
        let table = self.table.lock().unwrap();
        table
            .rows
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, category: &NewCategory) -> Result<Category> {
        self.enter(true)?;
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let now = Utc::now();
        let row = Category {
            id: table.next_id,
            name: category.name.clone(),
            description: category.description.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, category: &Category) -> Result<()> {
        self.enter(true)?;
        let mut table = self.table.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(id))?;
        row.name = category.name.clone();
        row.description = category.description.clone();
        row.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.enter(true)?;
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|c| c.id != id);
        if table.rows.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// Service wired to a fresh in-memory repository
pub fn in_memory_service(
    repo: InMemoryCategoryRepository,
) -> (Arc<CategoryService>, Arc<InMemoryCategoryRepository>) {
    let repo = Arc::new(repo);
    let service = Arc::new(CategoryService::new(repo.clone()));
    (service, repo)
}

/// Test server exposing the category routes over an in-memory repository
pub fn category_test_server(
    repo: InMemoryCategoryRepository,
) -> (TestServer, Arc<InMemoryCategoryRepository>) {
    let (service, repo) = in_memory_service(repo);
    let app: Router = routes::routes(service);
    let server = TestServer::new(app).unwrap();
    (server, repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[tokio::test]
    async fn test_double_update_and_delete_on_missing_row_are_not_found() {
        let repo = InMemoryCategoryRepository::new();
        let seeded = InMemoryCategoryRepository::with_categories(&["Fruits"]);
        let row = seeded.find_by_id(1).await.unwrap();

        let err = repo.update(5, &row).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = repo.delete(5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(repo.writes(), 2);
    }
}
