use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::ClinicDatabase;

/// Shared handle passed to every cell router.
pub struct AppState {
    pub config: AppConfig,
    pub db: Arc<ClinicDatabase>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_database(config, Arc::new(ClinicDatabase::new()))
    }

    pub fn with_database(config: AppConfig, db: Arc<ClinicDatabase>) -> Self {
        Self { config, db }
    }
}
