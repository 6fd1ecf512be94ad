use catalog_core::clock::parse_timestamp;
use catalog_core::domain::product::{CatalogSummary, Product, ProductId};
use tracing::info;

use crate::repositories::{ProductRepository, RepositoryError};

struct SeedProduct {
    id: i64,
    name: &'static str,
    description: &'static str,
    price: f64,
    stock: i64,
    category: &'static str,
    status: &'static str,
    created_at: &'static str,
}

/// Records every fresh catalog starts with, in listing order.
const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: 1,
        name: "iPhone 15 Pro",
        description: "苹果最新款智能手机，A17 Pro芯片，钛金属设计",
        price: 8999.00,
        stock: 50,
        category: "电子产品",
        status: "active",
        created_at: "2024-01-15T10:00:00",
    },
    SeedProduct {
        id: 2,
        name: "MacBook Air M3",
        description: "轻薄便携笔记本电脑，M3芯片，续航超长",
        price: 9499.00,
        stock: 25,
        category: "电子产品",
        status: "active",
        created_at: "2024-01-14T10:00:00",
    },
    SeedProduct {
        id: 3,
        name: "纯棉T恤",
        description: "100%纯棉材质，舒适透气，多色可选",
        price: 129.00,
        stock: 200,
        category: "服装",
        status: "active",
        created_at: "2024-01-13T10:00:00",
    },
    SeedProduct {
        id: 4,
        name: "有机茶叶礼盒",
        description: "精选高山有机茶叶，健康礼品首选",
        price: 388.00,
        stock: 0,
        category: "食品",
        status: "inactive",
        created_at: "2024-01-12T10:00:00",
    },
    SeedProduct {
        id: 5,
        name: "智能台灯",
        description: "可调节亮度，无蓝光危害，触控操作",
        price: 299.00,
        stock: 8,
        category: "家居",
        status: "active",
        created_at: "2024-01-11T10:00:00",
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub products_seeded: usize,
    pub next_id: ProductId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
    pub summary: CatalogSummary,
}

pub struct SeedDataset;

impl SeedDataset {
    pub fn products() -> Result<Vec<Product>, RepositoryError> {
        SEED_PRODUCTS
            .iter()
            .map(|seed| {
                let stamped = parse_timestamp(seed.created_at).map_err(|error| {
                    RepositoryError::InvalidSeed(format!(
                        "seed product {} has invalid timestamp `{}`: {error}",
                        seed.id, seed.created_at
                    ))
                })?;

                Ok(Product {
                    id: ProductId(seed.id),
                    name: seed.name.to_string(),
                    description: seed.description.to_string(),
                    price: seed.price,
                    stock: seed.stock,
                    category: seed.category.to_string(),
                    status: seed.status.to_string(),
                    created_at: stamped,
                    updated_at: stamped,
                })
            })
            .collect()
    }

    pub async fn load(repo: &dyn ProductRepository) -> Result<SeedResult, RepositoryError> {
        let products_seeded = repo.seed(Self::products()?).await?;
        let next_id = repo.next_id().await?;

        info!(
            event_name = "catalog.seed.loaded",
            correlation_id = "bootstrap",
            products_seeded,
            next_id = next_id.0,
            "seed catalog loaded"
        );

        Ok(SeedResult { products_seeded, next_id })
    }

    /// Checks that every seed record is stored unchanged and in seed order.
    pub async fn verify(
        repo: &dyn ProductRepository,
    ) -> Result<VerificationResult, RepositoryError> {
        let expected = Self::products()?;
        let stored = repo.list().await?;

        let all_ids_present = expected
            .iter()
            .all(|seed| stored.iter().any(|product| product.id == seed.id));
        let records_unchanged = expected
            .iter()
            .all(|seed| stored.iter().any(|product| product == seed));
        let seed_order: Vec<ProductId> = stored
            .iter()
            .filter(|product| expected.iter().any(|seed| seed.id == product.id))
            .map(|product| product.id)
            .collect();
        let order_preserved =
            seed_order == expected.iter().map(|seed| seed.id).collect::<Vec<_>>();
        let highest_seed_id = expected.iter().map(|seed| seed.id.0).max().unwrap_or(0);
        let counter_ahead = repo.next_id().await?.0 > highest_seed_id;

        let checks = vec![
            ("seed_ids_present", all_ids_present),
            ("seed_records_unchanged", records_unchanged),
            ("seed_order_preserved", order_preserved),
            ("next_id_ahead_of_seed", counter_ahead),
        ];

        Ok(VerificationResult {
            all_present: checks.iter().all(|(_, passed)| *passed),
            checks,
            summary: CatalogSummary::from_products(&stored),
        })
    }
}
