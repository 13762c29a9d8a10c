// BaZi Calculator - Core Library
// Exposes the calendar/pillar engine for use in the CLI, API server, and tests

pub mod chart;
pub mod compatibility;
pub mod cycle;
pub mod geo;
pub mod pillars;
pub mod session;

// Re-export commonly used types
pub use chart::{Chart, ElementTally, Pillar, PillarRole, Subject};
pub use compatibility::{compatibility, CompatibilityReport, ElementSpread, Rating};
pub use cycle::{
    branch_index, stem_index, BranchInfo, Element, Polarity, StemInfo, ALL_ELEMENTS,
    EARTHLY_BRANCHES, HEAVENLY_STEMS,
};
pub use geo::{City, GeoDataset, Province, REGIONS_URL};
pub use pillars::{
    day_pillar, effective_year, five_tigers_start, hour_branch, hour_pillar, month_branch,
    month_pillar, year_pillar, MONTH_BOUNDARIES, REFERENCE_YEAR,
};
pub use session::{ChartEntry, ChartSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
