use std::sync::Arc;
use tokio::sync::RwLock;

use rota_exchange::app_state::{
    AppState, AssignmentStoreType, SwapStoreType,
};
use rota_exchange::services::data_stores::{
    PostgresExchangeStore, PostgresPreferenceStore, PostgresRosterStore,
};
use rota_exchange::utils::config::load_org_config;
use rota_exchange::utils::constants::{prod, DATABASE_URL, ORG_CONFIG_PATH};
use rota_exchange::utils::tracing::init_tracing;
use rota_exchange::{get_postgres_pool, Application};

#[tokio::main]
async fn main() {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .expect("Failed to create Postgres connection pool!");
    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    let (shift_catalog, equivalence_registry) =
        load_org_config(ORG_CONFIG_PATH.as_str())
            .expect("Failed to load organization config");

    // The exchange store backs both the assignment ledger and the swap
    // records so the accept path can mutate them in one transaction.
    let exchange_store =
        Arc::new(RwLock::new(PostgresExchangeStore::new(pg_pool.clone())));
    let assignment_store: AssignmentStoreType = exchange_store.clone();
    let swap_store: SwapStoreType = exchange_store;
    let preference_store = Arc::new(RwLock::new(
        PostgresPreferenceStore::new(pg_pool.clone()),
    ));
    let roster_store =
        Arc::new(RwLock::new(PostgresRosterStore::new(pg_pool)));

    let app_state = AppState::new(
        assignment_store,
        preference_store,
        roster_store,
        swap_store,
        Arc::new(shift_catalog),
        Arc::new(equivalence_registry),
    );

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .expect("Failed to build app");

    app.run().await.expect("Failed to run app");
}
