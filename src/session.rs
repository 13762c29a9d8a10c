// Chart Session - ordered multi-subject comparison collection
//
// Replaces the original per-card UI state: a plain ordered Vec of charts
// owned by the caller for the lifetime of a comparison session. Entries get
// a stable uuid so a front end can remove a specific card without index
// bookkeeping. No interior mutability, no locks.

use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::compatibility::{compatibility, CompatibilityReport};

/// One subject's entry in a comparison session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartEntry {
    /// Stable identity for this entry (uuid v4)
    pub id: String,
    pub chart: Chart,
}

/// Ordered collection of charts for one comparison session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartSession {
    entries: Vec<ChartEntry>,
}

impl ChartSession {
    pub fn new() -> Self {
        ChartSession { entries: Vec::new() }
    }

    /// Add a chart; returns the assigned entry id.
    pub fn add(&mut self, chart: Chart) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.entries.push(ChartEntry { id: id.clone(), chart });
        id
    }

    /// Remove an entry by id. Returns the removed chart, if present.
    pub fn remove(&mut self, id: &str) -> Option<Chart> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).chart)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ChartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compatibility over all held charts; `None` with fewer than 2.
    pub fn compatibility(&self) -> Option<CompatibilityReport> {
        let charts: Vec<Chart> = self.entries.iter().map(|e| e.chart.clone()).collect();
        compatibility(&charts)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn chart(y: i32, mo: u32, d: u32) -> Chart {
        Chart::compute(
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut session = ChartSession::new();
        let a = session.add(chart(1990, 5, 15));
        let b = session.add(chart(1992, 8, 1));
        let c = session.add(chart(1961, 2, 3));
        let ids: Vec<&str> = session.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, [a.as_str(), b.as_str(), c.as_str()]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut session = ChartSession::new();
        let a = session.add(chart(1990, 5, 15));
        let b = session.add(chart(1992, 8, 1));
        assert!(session.remove(&a).is_some());
        assert_eq!(session.len(), 1);
        assert_eq!(session.entries()[0].id, b);
        assert!(session.remove(&a).is_none());
    }

    #[test]
    fn test_compatibility_requires_two() {
        let mut session = ChartSession::new();
        assert!(session.compatibility().is_none());
        session.add(chart(1990, 5, 15));
        assert!(session.compatibility().is_none());
        session.add(chart(1990, 5, 15));
        let report = session.compatibility().unwrap();
        assert_eq!(report.total_spread, 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut session = ChartSession::new();
        let a = session.add(chart(1990, 5, 15));
        let b = session.add(chart(1990, 5, 15));
        assert_ne!(a, b);
    }
}
