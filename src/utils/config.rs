use color_eyre::eyre::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::domain::{
    EquivalenceRegistry, EquivalenceSet, RawShiftType, ShiftCatalog,
};

// On-disk shape of the per-organization scheduling configuration: the
// shift catalog with its eligibility rules, and the named equivalence
// sets used when matching swap partners.
#[derive(Debug, Deserialize)]
pub struct OrgConfig {
    #[serde(rename = "shiftTypes")]
    pub shift_types: Vec<RawShiftType>,
    #[serde(rename = "equivalenceSets", default)]
    pub equivalence_sets: Vec<EquivalenceSet>,
}

#[tracing::instrument(name = "Loading organization config", skip_all)]
pub fn load_org_config(
    path: impl AsRef<Path>,
) -> Result<(ShiftCatalog, EquivalenceRegistry)> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).wrap_err_with(|| {
        format!("failed to read organization config: {}", path.display())
    })?;
    let config: OrgConfig = serde_json::from_str(&raw).wrap_err_with(|| {
        format!("failed to parse organization config: {}", path.display())
    })?;

    let catalog = ShiftCatalog::from_raw(config.shift_types)
        .wrap_err("invalid shift type configuration")?;
    let registry = EquivalenceRegistry::from_sets(config.equivalence_sets)
        .wrap_err("invalid equivalence set configuration")?;

    Ok((catalog, registry))
}
