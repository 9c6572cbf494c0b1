use std::sync::Arc;

use crate::account::{AccountApplicationService, Database};

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// Use-case layer; all account operations go through it
    pub app_service: Arc<AccountApplicationService>,
    /// Pool access for health checks
    pub db: Arc<Database>,
    /// Display/parse precision for amounts
    pub money_decimals: u32,
}

impl AppState {
    pub fn new(
        app_service: Arc<AccountApplicationService>,
        db: Arc<Database>,
        money_decimals: u32,
    ) -> Self {
        Self {
            app_service,
            db,
            money_decimals,
        }
    }
}
