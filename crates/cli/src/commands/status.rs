use crate::client::{CatalogClient, HealthReport};
use crate::commands::{json_report, request_failed, Report, EXIT_FAILED};

pub async fn run(client: &CatalogClient, json: bool) -> Report {
    let report = match client.health().await {
        Ok(report) => report,
        Err(error) => return request_failed(error),
    };

    let exit_code = if report.is_ready() { 0 } else { EXIT_FAILED };
    if json {
        return json_report(&report, exit_code);
    }
    Report { exit_code, output: render(client.base_url(), &report) }
}

fn render(base_url: &str, report: &HealthReport) -> String {
    let mut lines = vec![
        format!(
            "catalog-server at {base_url} is {} (checked {})",
            report.status, report.checked_at
        ),
        format!("- catalog: {} ({})", report.catalog.status, report.catalog.detail),
    ];
    match &report.catalog.summary {
        Some(summary) => lines.push(format!(
            "- products: {} total, {} active, {} low stock, {} out of stock",
            summary.total, summary.active, summary.low_stock, summary.out_of_stock
        )),
        None => lines.push("- products: unavailable".to_string()),
    }
    lines.join("\n")
}
