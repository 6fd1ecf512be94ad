use catalog_core::{CatalogSummary, Product, ProductId};

use crate::client::CatalogClient;
use crate::commands::{json_report, request_failed, Report, EXIT_FAILED};

pub async fn list(client: &CatalogClient, json: bool) -> Report {
    match client.list_products().await {
        Ok(products) if json => json_report(&products, 0),
        Ok(products) => Report::ok(render_table(&products)),
        Err(error) => request_failed(error),
    }
}

pub async fn show(client: &CatalogClient, id: ProductId) -> Report {
    match client.product(id).await {
        Ok(Some(product)) => json_report(&product, 0),
        Ok(None) => {
            Report::failed(EXIT_FAILED, format!("product {id} not found (产品不存在)"))
        }
        Err(error) => request_failed(error),
    }
}

fn render_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "catalog is empty".to_string();
    }

    let mut lines = vec![format!(
        "{:>4}  {:>10}  {:>6}  {:<8}  {:<10}  {}",
        "ID", "PRICE", "STOCK", "STATUS", "CATEGORY", "NAME"
    )];
    lines.extend(products.iter().map(|product| {
        format!(
            "{:>4}  {:>10.2}  {:>6}  {:<8}  {:<10}  {}",
            product.id.0,
            product.price,
            product.stock,
            product.status,
            product.category,
            product.name
        )
    }));

    let summary = CatalogSummary::from_products(products);
    lines.push(format!(
        "{} products ({} active, {} low stock, {} out of stock)",
        summary.total, summary.active, summary.low_stock, summary.out_of_stock
    ));
    lines.join("\n")
}
