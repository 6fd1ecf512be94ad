use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use catalog_core::clock::{Clock, SystemClock};
use catalog_core::domain::product::{NewProduct, Product, ProductId, ProductPatch};

use super::{ProductRepository, RepositoryError};

struct CatalogState {
    products: Vec<Product>,
    next_id: i64,
}

impl CatalogState {
    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|product| product.id == *id)
    }
}

/// Volatile catalog store. The record list and the id counter sit behind one
/// lock so id assignment and append happen as a single step.
pub struct InMemoryProductRepository {
    state: RwLock<CatalogState>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl InMemoryProductRepository {
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { state: RwLock::new(CatalogState { products: Vec::new(), next_id: 1 }), clock }
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.products.clone())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.products.iter().find(|product| product.id == *id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let mut state = self.state.write().await;
        let created = product.into_product(ProductId(state.next_id), self.clock.now());
        state.products.push(created.clone());
        state.next_id += 1;
        Ok(created)
    }

    async fn update(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut state = self.state.write().await;
        let Some(index) = state.position(id) else {
            return Ok(None);
        };

        let product = &mut state.products[index];
        product.apply_patch(patch, self.clock.now());
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        match state.position(id) {
            Some(index) => {
                state.products.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn seed(&self, products: Vec<Product>) -> Result<usize, RepositoryError> {
        let mut state = self.state.write().await;

        let mut seen: HashSet<ProductId> =
            state.products.iter().map(|product| product.id).collect();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(RepositoryError::DuplicateId(product.id));
            }
        }

        let highest = products.iter().map(|product| product.id.0).max().unwrap_or(0);
        state.next_id = state.next_id.max(highest + 1);

        let count = products.len();
        state.products.extend(products);
        Ok(count)
    }

    async fn next_id(&self) -> Result<ProductId, RepositoryError> {
        let state = self.state.read().await;
        Ok(ProductId(state.next_id))
    }
}
