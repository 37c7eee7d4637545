//! Category CRUD feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/categories` | List all categories with count |
//! | GET | `/categories/{id}` | Get a single category |
//! | POST | `/categories` | Create a category |
//! | PUT | `/categories/{id}` | Update name and description |
//! | DELETE | `/categories/{id}` | Delete a category |
//!
//! Requests flow handler -> service -> repository. The service owns
//! validation; the repository only maps operations onto SQL.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgCategoryRepository;
pub use services::CategoryService;
