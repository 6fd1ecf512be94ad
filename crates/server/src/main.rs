use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    catalog_server::run().await
}
