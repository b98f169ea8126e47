// ==========================================
// Voltway Industrial OS - Application state
// ==========================================
// Responsibility: wire the shared connection, repositories,
// snapshot store and API instances together
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{
    BomApi, ChatApi, ConfigApi, DashboardApi, InventoryApi, MasterDataApi,
    MasterDataRepositories,
};
use crate::assistant::{GeminiSummarizer, Summarizer, UnavailableSummarizer};
use crate::config::{ConfigManager, PlanningSettings};
use crate::repository::{
    BomRepository, CustomerRepository, DispatchParameterRepository, PartRepository,
    ProductRepository, PurchaseOrderRepository, SalesOrderRepository, StockRepository,
    SupplierRepository, WarehouseRepository,
};
use crate::services::{PollingHandle, SnapshotRefreshService};
use crate::snapshot::{SnapshotStore, SqliteSnapshotSource};

pub struct AppState {
    pub db_path: String,
    pub conn: Arc<Mutex<Connection>>,
    pub settings: PlanningSettings,

    pub config_manager: Arc<ConfigManager>,
    pub snapshot_store: Arc<SnapshotStore>,
    pub refresh_service: Arc<SnapshotRefreshService>,

    pub dashboard_api: Arc<DashboardApi>,
    pub bom_api: Arc<BomApi>,
    pub inventory_api: Arc<InventoryApi>,
    pub master_data_api: Arc<MasterDataApi>,
    pub chat_api: Arc<ChatApi>,
    pub config_api: Arc<ConfigApi>,
}

impl AppState {
    /// Open the database and use the hosted model when an API key is set
    pub async fn new(db_path: &str) -> Result<Self, String> {
        Self::build(db_path, None).await
    }

    pub async fn with_summarizer(
        db_path: &str,
        summarizer: Arc<dyn Summarizer>,
    ) -> Result<Self, String> {
        Self::build(db_path, Some(summarizer)).await
    }

    async fn build(db_path: &str, summarizer: Option<Arc<dyn Summarizer>>) -> Result<Self, String> {
        tracing::info!(db_path, "initializing AppState");

        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| format!("cannot open database: {}", e))?;
        crate::db::init_schema(&conn).map_err(|e| format!("schema initialization failed: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ===== Configuration =====
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("cannot create ConfigManager: {}", e))?,
        );
        let settings = match PlanningSettings::load(config_manager.as_ref()).await {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "invalid stored configuration, using defaults");
                PlanningSettings::default()
            }
        };
        crate::i18n::set_locale(&settings.locale);

        // ===== Snapshot =====
        let snapshot_store = Arc::new(SnapshotStore::new());
        let refresh_service = Arc::new(SnapshotRefreshService::new(
            Arc::new(SqliteSnapshotSource::new(conn.clone())),
            snapshot_store.clone(),
        ));

        // ===== Repositories =====
        let repos = MasterDataRepositories {
            parts: Arc::new(PartRepository::from_connection(conn.clone())),
            products: Arc::new(ProductRepository::from_connection(conn.clone())),
            customers: Arc::new(CustomerRepository::from_connection(conn.clone())),
            warehouses: Arc::new(WarehouseRepository::from_connection(conn.clone())),
            stock: Arc::new(StockRepository::from_connection(conn.clone())),
            suppliers: Arc::new(SupplierRepository::from_connection(conn.clone())),
            dispatch_parameters: Arc::new(DispatchParameterRepository::from_connection(
                conn.clone(),
            )),
            purchase_orders: Arc::new(PurchaseOrderRepository::from_connection(conn.clone())),
            sales_orders: Arc::new(SalesOrderRepository::from_connection(conn.clone())),
        };
        let bom_repo = Arc::new(BomRepository::from_connection(conn.clone()));

        // ===== Assistant =====
        let summarizer = summarizer.unwrap_or_else(|| {
            match GeminiSummarizer::from_env(&settings.assistant_model, settings.assistant_temperature)
            {
                Ok(s) => Arc::new(s) as Arc<dyn Summarizer>,
                Err(e) => {
                    tracing::warn!(error = %e, "assistant disabled");
                    Arc::new(UnavailableSummarizer)
                }
            }
        });

        // ===== APIs =====
        let dashboard_api = Arc::new(DashboardApi::new(refresh_service.clone(), settings.clone()));
        let bom_api = Arc::new(BomApi::new(
            bom_repo,
            refresh_service.clone(),
            settings.clone(),
        ));
        let inventory_api = Arc::new(InventoryApi::new(
            repos.stock.clone(),
            repos.purchase_orders.clone(),
            refresh_service.clone(),
        ));
        let master_data_api = Arc::new(MasterDataApi::new(repos, refresh_service.clone()));
        let chat_api = Arc::new(ChatApi::new(
            summarizer,
            refresh_service.clone(),
            settings.clone(),
        ));
        let config_api = Arc::new(ConfigApi::new(config_manager.clone()));

        tracing::info!("AppState initialized");
        Ok(Self {
            db_path: db_path.to_string(),
            conn,
            settings,
            config_manager,
            snapshot_store,
            refresh_service,
            dashboard_api,
            bom_api,
            inventory_api,
            master_data_api,
            chat_api,
            config_api,
        })
    }

    /// Load a fresh snapshot now
    pub async fn refresh(&self) -> Result<(), String> {
        self.refresh_service
            .refresh()
            .await
            .map(|_| ())
            .map_err(|e| format!("snapshot refresh failed: {}", e))
    }

    /// Background refresh at the configured interval
    pub fn start_polling(&self) -> PollingHandle {
        self.refresh_service
            .spawn_polling(self.settings.refresh_interval)
    }
}

/// Database path: VOLTWAY_IOS_DB_PATH, else the user data directory
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("VOLTWAY_IOS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./voltway_ios.db");
    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        let dir = data_dir.join("voltway-ios-dev");
        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("voltway-ios");

        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("voltway_ios.db");
        }
    }
    path.to_string_lossy().to_string()
}
