//! List exchanges from a running back-office API
//!
//! Reads `BACKOFFICE_*` variables (a `.env` file is honoured), prints the
//! first page of exchanges and the paginator.
//!
//! Run: cargo run --example list_exchanges -- [search]

use std::sync::Arc;

use anyhow::Context;
use backoffice_client::list::table::headers;
use backoffice_client::logger::init_logger;
use backoffice_client::{ClientConfig, ListController, PageToken, ResourceApi, Role};
use shared::models::{Exchange, ExchangeFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_logger(&level, false)?;

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "connecting");

    let http = Arc::new(config.build_http_client()?);
    let api = Arc::new(ResourceApi::<Exchange, _>::new(http));
    let list = ListController::from_config(api, Role::admin(), &config);

    let filter = ExchangeFilter {
        busqueda: std::env::args().nth(1),
        ..Default::default()
    };
    list.apply_filters(filter)
        .await
        .context("failed to load exchanges")?;

    println!("{}", headers::<Exchange>().join(" | "));
    for row in list.rows_with_toggles(None) {
        let cells: Vec<String> = row.cells.iter().map(|c| c.display()).collect();
        let flags: Vec<String> = row
            .toggles
            .iter()
            .map(|t| format!("{}={}", t.field, if t.value { "si" } else { "no" }))
            .collect();
        println!("{} | {}", cells.join(" | "), flags.join(" "));
    }

    let snapshot = list.snapshot();
    let pages: Vec<String> = list
        .page_tokens(config.max_page_buttons)
        .iter()
        .map(|t| match t {
            PageToken::Page(n) if *n == snapshot.current_page => format!("[{n}]"),
            PageToken::Page(n) => n.to_string(),
            PageToken::Ellipsis => "…".to_string(),
        })
        .collect();
    println!("\n{} exchanges  {}", snapshot.total_count, pages.join(" "));

    Ok(())
}
