pub mod fixtures;
pub mod repositories;

pub use fixtures::{SeedDataset, SeedResult, VerificationResult};
pub use repositories::{InMemoryProductRepository, ProductRepository, RepositoryError};
