use async_trait::async_trait;
use thiserror::Error;

use catalog_core::domain::product::{NewProduct, Product, ProductId, ProductPatch};

pub mod memory;

pub use memory::InMemoryProductRepository;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("product id {0} is already present in the catalog")]
    DuplicateId(ProductId),
    #[error("seed record is malformed: {0}")]
    InvalidSeed(String),
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

/// Ordered product storage. Listing order is insertion order.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Assigns the next id, stamps both timestamps and appends the record.
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    /// Returns `None` without touching the store when no record has `id`.
    async fn update(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Returns `false` without touching the store when no record has `id`.
    async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError>;

    /// Appends pre-built records, keeping their ids and timestamps.
    async fn seed(&self, products: Vec<Product>) -> Result<usize, RepositoryError>;

    async fn next_id(&self) -> Result<ProductId, RepositoryError>;
}
