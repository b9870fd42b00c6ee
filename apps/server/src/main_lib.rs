use std::sync::Arc;

use crate::config::Config;
use stockledger_core::{
    movements::{MovementService, MovementServiceTrait},
    products::{ProductService, ProductServiceTrait},
    reconciliation::{ReconciliationService, ReconciliationServiceTrait},
    sources::build_sources,
    stock_report::{StockReportService, StockReportServiceTrait},
    warehouses::{WarehouseService, WarehouseServiceTrait},
};
use stockledger_storage_sqlite::{
    db, movements::MovementRepository, products::ProductRepository,
    reconciliation::MappingRepository, warehouses::WarehouseRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub product_service: Arc<dyn ProductServiceTrait>,
    pub warehouse_service: Arc<dyn WarehouseServiceTrait>,
    pub movement_service: Arc<dyn MovementServiceTrait>,
    pub reconciliation_service: Arc<dyn ReconciliationServiceTrait>,
    pub stock_report_service: Arc<dyn StockReportServiceTrait>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // A subscriber may already be installed when several routers share a process.
    if log_format.eq_ignore_ascii_case("json") {
        let _ = registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init();
    } else {
        let _ = registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&db::get_db_path(&config.db_path))?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    let product_repo = Arc::new(ProductRepository::new(pool.clone(), writer.clone()));
    let warehouse_repo = Arc::new(WarehouseRepository::new(pool.clone(), writer.clone()));
    let movement_repo = Arc::new(MovementRepository::new(pool.clone(), writer.clone()));
    let mapping_repo = Arc::new(MappingRepository::new(pool.clone(), writer.clone()));

    let product_service = Arc::new(ProductService::new(product_repo.clone()));
    let warehouse_service = Arc::new(WarehouseService::new(warehouse_repo.clone()));
    let movement_service: Arc<dyn MovementServiceTrait> = Arc::new(MovementService::new(
        movement_repo,
        product_repo,
        warehouse_repo,
    ));
    let reconciliation_service = Arc::new(ReconciliationService::new(mapping_repo));

    let source_configs = config.load_sources()?;
    tracing::info!("Configured stock sources: {}", source_configs.len());
    let sources = build_sources(&source_configs)?;
    let stock_report_service = Arc::new(StockReportService::new(
        sources,
        movement_service.clone(),
    ));

    Ok(Arc::new(AppState {
        product_service,
        warehouse_service,
        movement_service,
        reconciliation_service,
        stock_report_service,
    }))
}
