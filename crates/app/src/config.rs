use anyhow::{Context, Result};
use lineage_kinship::Locale;
use lineage_layout::Geometry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings read from a RON file, every field is optional
///
/// ```ron
/// (
///     geometry: (node_width: 160.0, vertical_gap: 60.0),
///     locale: ukrainian,
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub geometry: Geometry,
    pub locale: Locale,
}

impl AppConfig {
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        Ok(ron::from_str(ron)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let ron = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_ron_str(&ron)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}
