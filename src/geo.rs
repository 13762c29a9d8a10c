// Geographic Dataset - province / city / district mapping
//
// Backs the optional location metadata only; pillar computation never reads
// it. The full dataset comes from a fixed versioned JSON resource; when the
// fetch or parse fails, a small embedded subset covering 5 major regions
// substitutes silently (degraded mode, reported on stderr, never a hard
// failure).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pinned remote dataset (version-locked so the shape cannot drift).
///
/// Wire shape: `{ "province": { "city": ["district", ...] } }`
pub const REGIONS_URL: &str = "https://unpkg.com/china-division@2.7.0/dist/pca.json";

/// Embedded fallback subset: 5 major regions, same wire shape.
const EMBEDDED_REGIONS: &str = include_str!("../data/regions_fallback.json");

/// The raw wire shape of the dataset.
type RegionMap = BTreeMap<String, BTreeMap<String, Vec<String>>>;

// ============================================================================
// DATA MODEL
// ============================================================================

/// City with its districts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub districts: Vec<String>,
}

/// Province with its cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub province: String,
    pub cities: Vec<City>,
}

/// Ordered three-level province -> city -> district mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoDataset {
    pub provinces: Vec<Province>,
}

impl GeoDataset {
    /// Parse a dataset from the wire JSON shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RegionMap = serde_json::from_str(json).context("Failed to parse regions JSON")?;
        Ok(Self::from_map(raw))
    }

    fn from_map(raw: RegionMap) -> Self {
        let provinces = raw
            .into_iter()
            .map(|(province, cities)| Province {
                province,
                cities: cities
                    .into_iter()
                    .map(|(name, districts)| City { name, districts })
                    .collect(),
            })
            .collect();
        GeoDataset { provinces }
    }

    /// The compiled-in fallback subset (5 major regions).
    pub fn embedded() -> Self {
        // The embedded file is fixed at build time; a parse failure here is
        // a build defect, not a runtime condition.
        Self::from_json(EMBEDDED_REGIONS).expect("embedded regions JSON is valid")
    }

    /// Fetch the full dataset from the pinned URL.
    #[cfg(feature = "server")]
    pub async fn fetch(url: &str) -> Result<Self> {
        let response = reqwest::get(url)
            .await
            .with_context(|| format!("Failed to fetch regions from {url}"))?
            .error_for_status()
            .context("Regions request returned an error status")?;
        let text = response
            .text()
            .await
            .context("Failed to read regions response body")?;
        Self::from_json(&text)
    }

    /// Fetch with silent fallback to the embedded subset.
    ///
    /// Location is optional metadata, so a network failure degrades
    /// coverage instead of blocking chart computation.
    #[cfg(feature = "server")]
    pub async fn load_or_embedded(url: &str) -> Self {
        match Self::fetch(url).await {
            Ok(dataset) => dataset,
            Err(e) => {
                eprintln!("⚠ Regions fetch failed ({e:#}); using embedded subset");
                Self::embedded()
            }
        }
    }

    pub fn province(&self, name: &str) -> Option<&Province> {
        self.provinces.iter().find(|p| p.province == name)
    }

    /// Cities of a province, in dataset order.
    pub fn cities(&self, province: &str) -> &[City] {
        self.province(province)
            .map(|p| p.cities.as_slice())
            .unwrap_or(&[])
    }

    /// Districts of a city within a province.
    pub fn districts(&self, province: &str, city: &str) -> &[String] {
        self.cities(province)
            .iter()
            .find(|c| c.name == city)
            .map(|c| c.districts.as_slice())
            .unwrap_or(&[])
    }
}

// ============================================================================
// TESTS
// ============================================================================
