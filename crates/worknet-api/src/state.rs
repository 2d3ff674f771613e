//! Application state.

use worknet_store::{init_schema, seed_default_plans, Database};

use crate::config::ApiConfig;
use crate::services::AccountService;

/// Shared application state. `Database` clones share one pool.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub db: Database,
    pub accounts: AccountService,
}

impl AppState {
    /// Connect to the store, bring the schema up, and seed the plan
    /// catalog.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::connect(&config.database_url).await?;
        init_schema(&db).await?;
        seed_default_plans(&db).await?;

        let accounts = AccountService::new(db.clone());

        Ok(Self {
            config,
            db,
            accounts,
        })
    }
}
