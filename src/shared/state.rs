use crate::erp::ErpClient;
use crate::shared::config::AppConfig;
use crate::shared::utils::DbPool;
use std::sync::Arc;

pub struct AppState {
    pub conn: DbPool,
    pub config: AppConfig,
    /// Absent when no ERP backend is configured; ERP reads then degrade to
    /// empty results instead of failing.
    pub erp: Option<Arc<dyn ErpClient>>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            config: self.config.clone(),
            erp: self.erp.clone(),
        }
    }
}
