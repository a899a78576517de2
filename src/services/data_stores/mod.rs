mod hashmap_exchange_store;
mod hashmap_preference_store;
mod hashmap_roster_store;
mod postgres_exchange_store;
mod postgres_preference_store;
mod postgres_roster_store;

pub use hashmap_exchange_store::*;
pub use hashmap_preference_store::*;
pub use hashmap_roster_store::*;
pub use postgres_exchange_store::*;
pub use postgres_preference_store::*;
pub use postgres_roster_store::*;
