use std::sync::Arc;
use std::time::Duration;

use banking_api::account::{
    AccountApplicationService, AccountService, ConcurrencyFacade, Database, LockRegistry, schema,
};
use banking_api::alarm::LogNotifier;
use banking_api::config::AppConfig;
use banking_api::gateway::{self, state::AppState};
use banking_api::logging;
use banking_api::member::MemberService;
use banking_api::social::FriendService;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::args().nth(1).unwrap_or_else(|| "dev".to_string());
    let config = AppConfig::load(&env);

    let _guard = logging::init_logging(&config);
    info!(
        version = env!("GIT_HASH"),
        env = %env,
        "starting banking gateway"
    );

    let db = Arc::new(Database::connect(&config.postgres_url).await?);
    schema::ensure_schema(db.pool()).await?;

    let registry = LockRegistry::new(Duration::from_millis(config.lock.wait_timeout_ms));
    let facade = Arc::new(ConcurrencyFacade::new(
        registry,
        AccountService::new(db.clone()),
        config.lock.max_retries,
    ));

    let app_service = Arc::new(AccountApplicationService::new(
        db.clone(),
        MemberService::new(db.clone()),
        FriendService::new(db.clone()),
        facade,
        Arc::new(LogNotifier),
    ));

    let state = Arc::new(AppState::new(app_service, db, config.money.decimals));

    gateway::run_server(&config.gateway.host, config.gateway.port, state).await;
    Ok(())
}
