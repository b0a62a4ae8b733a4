use std::path::Path;

use campaign_map_shared::models::MapDescriptor;
use campaign_map_shared::validate::{self, Severity};

/// What the startup probe found in the root descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct RootSummary {
    pub pois: usize,
    pub unplaced: usize,
    pub errors: usize,
}

/// Read and check the root map descriptor so a broken deploy shows up in the logs.
pub fn probe_root(path: &Path) -> Result<RootSummary, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let descriptor = MapDescriptor::from_json(&path.display().to_string(), &data)
        .map_err(|e| e.to_string())?;

    let issues = validate::validate_descriptor(&descriptor);
    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    for issue in issues.iter().filter(|i| i.is_error()) {
        tracing::warn!(descriptor = %path.display(), "{issue}");
    }

    let summary = RootSummary {
        pois: descriptor.points_of_interest.len(),
        unplaced: descriptor.points_of_interest.iter().filter(|p| !p.is_placed()).count(),
        errors,
    };
    tracing::info!(
        pois = summary.pois,
        unplaced = summary.unplaced,
        errors = summary.errors,
        "Loaded root map descriptor"
    );
    Ok(summary)
}
