// Compatibility Heuristic - element spread across multiple charts
//
// For each of the 5 elements, take max - min of the element count over all
// charts and sum the 5 spreads. Small total spread means the charts lean on
// the same elements. This reads only the already-computed tallies; no
// calendar logic happens here.

use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::cycle::{Element, ALL_ELEMENTS};

// ============================================================================
// RATING
// ============================================================================

/// Bucketed compatibility rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    High,
    Medium,
    Low,
}

impl Rating {
    /// Bucket a total spread: <=3 high, <=6 medium, else low.
    pub fn from_spread(total: u8) -> Self {
        if total <= 3 {
            Rating::High
        } else if total <= 6 {
            Rating::Medium
        } else {
            Rating::Low
        }
    }

    /// Chinese label (高/中/低).
    pub fn label(&self) -> &'static str {
        match self {
            Rating::High => "高",
            Rating::Medium => "中",
            Rating::Low => "低",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::High => "high",
            Rating::Medium => "medium",
            Rating::Low => "low",
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Per-element spread of one element across the compared charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSpread {
    pub element: Element,
    pub min: u8,
    pub max: u8,
    pub spread: u8,
}

/// Result of comparing 2+ charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub chart_count: usize,
    pub spreads: Vec<ElementSpread>,
    pub total_spread: u8,
    pub rating: Rating,
    /// Chinese rating label for display
    pub rating_label: String,
}

// ============================================================================
// COMPUTATION
// ============================================================================

/// Compare the element tallies of 2+ charts.
///
/// Returns `None` for fewer than 2 charts (not computable).
pub fn compatibility(charts: &[Chart]) -> Option<CompatibilityReport> {
    if charts.len() < 2 {
        return None;
    }

    let mut spreads = Vec::with_capacity(ALL_ELEMENTS.len());
    let mut total_spread = 0u8;
    for element in ALL_ELEMENTS {
        let counts = charts.iter().map(|c| c.elements_count.count(element));
        // len >= 2, so min/max always exist
        let min = counts.clone().min().unwrap_or(0);
        let max = counts.max().unwrap_or(0);
        let spread = max - min;
        total_spread += spread;
        spreads.push(ElementSpread { element, min, max, spread });
    }

    let rating = Rating::from_spread(total_spread);
    Some(CompatibilityReport {
        chart_count: charts.len(),
        spreads,
        total_spread,
        rating,
        rating_label: rating.label().to_string(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
