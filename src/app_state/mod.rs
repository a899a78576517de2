use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{
    AssignmentStore, EquivalenceRegistry, PreferenceStore, RosterStore,
    ShiftCatalog, SwapStore,
};

pub type AssignmentStoreType = Arc<RwLock<dyn AssignmentStore + Send + Sync>>;
pub type PreferenceStoreType = Arc<RwLock<dyn PreferenceStore + Send + Sync>>;
pub type RosterStoreType = Arc<RwLock<dyn RosterStore + Send + Sync>>;
pub type SwapStoreType = Arc<RwLock<dyn SwapStore + Send + Sync>>;
pub type ShiftCatalogType = Arc<ShiftCatalog>;
pub type EquivalenceRegistryType = Arc<EquivalenceRegistry>;

#[derive(Clone)]
pub struct AppState {
    pub assignment_store: AssignmentStoreType,
    pub preference_store: PreferenceStoreType,
    pub roster_store: RosterStoreType,
    pub swap_store: SwapStoreType,
    pub shift_catalog: ShiftCatalogType,
    pub equivalence_registry: EquivalenceRegistryType,
}

impl AppState {
    pub fn new(
        assignment_store: AssignmentStoreType,
        preference_store: PreferenceStoreType,
        roster_store: RosterStoreType,
        swap_store: SwapStoreType,
        shift_catalog: ShiftCatalogType,
        equivalence_registry: EquivalenceRegistryType,
    ) -> Self {
        Self {
            assignment_store,
            preference_store,
            roster_store,
            swap_store,
            shift_catalog,
            equivalence_registry,
        }
    }
}
