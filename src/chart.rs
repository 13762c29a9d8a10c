// Chart Assembler - the engine's sole entry point
//
// Orchestrates the four derivers in dependency order
// (year -> day -> month [needs year stem] -> hour [needs day stem]),
// resolves glyphs via the constant tables and tallies elements and
// yin/yang. A Chart is immutable once produced; "recompute" means
// producing a new Chart.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::cycle::{Element, EARTHLY_BRANCHES, HEAVENLY_STEMS};
use crate::pillars::{day_pillar, hour_pillar, month_pillar, year_pillar};

// ============================================================================
// PILLAR
// ============================================================================

/// Role of a pillar within the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarRole {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarRole {
    /// Chinese label used in the serialized chart (年柱, 月柱, 日柱, 时柱).
    pub fn label(&self) -> &'static str {
        match self {
            PillarRole::Year => "年柱",
            PillarRole::Month => "月柱",
            PillarRole::Day => "日柱",
            PillarRole::Hour => "时柱",
        }
    }
}

/// One stem/branch pairing with its resolved glyphs.
///
/// Stem and branch indices cycle independently (mod 10 / mod 12). The
/// simplified rules can produce pairs outside the classical 60-combination
/// parity constraint; that behavior is preserved, not corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    /// Chinese pillar label (年柱 etc.)
    pub pillar: String,
    pub role: PillarRole,
    pub stem_index: usize,
    pub branch_index: usize,
    /// Stem glyph (甲, 乙, ...)
    pub stem: String,
    /// Branch glyph (子, 丑, ...)
    pub branch: String,
}

impl Pillar {
    fn new(role: PillarRole, stem_index: usize, branch_index: usize) -> Self {
        Pillar {
            pillar: role.label().to_string(),
            role,
            stem_index,
            branch_index,
            stem: HEAVENLY_STEMS[stem_index].name.to_string(),
            branch: EARTHLY_BRANCHES[branch_index].name.to_string(),
        }
    }

    /// Element of this pillar's stem.
    pub fn stem_element(&self) -> Element {
        HEAVENLY_STEMS[self.stem_index].element
    }

    /// Element of this pillar's branch.
    pub fn branch_element(&self) -> Element {
        EARTHLY_BRANCHES[self.branch_index].element
    }
}

// ============================================================================
// ELEMENT TALLY
// ============================================================================

/// Per-element counts across the 4 pillars (stem + branch each), sum 8.
///
/// Serialized with Chinese keys to match the original wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTally {
    #[serde(rename = "木")]
    pub wood: u8,
    #[serde(rename = "火")]
    pub fire: u8,
    #[serde(rename = "土")]
    pub earth: u8,
    #[serde(rename = "金")]
    pub metal: u8,
    #[serde(rename = "水")]
    pub water: u8,
}

impl ElementTally {
    pub fn count(&self, element: Element) -> u8 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    fn increment(&mut self, element: Element) {
        match element {
            Element::Wood => self.wood += 1,
            Element::Fire => self.fire += 1,
            Element::Earth => self.earth += 1,
            Element::Metal => self.metal += 1,
            Element::Water => self.water += 1,
        }
    }

    pub fn total(&self) -> u8 {
        self.wood + self.fire + self.earth + self.metal + self.water
    }
}

// ============================================================================
// SUBJECT METADATA
// ============================================================================

/// Caller-supplied identity metadata attached to a Chart.
///
/// The engine never interprets or validates these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub name: String,
    /// Relationship label (本人, 配偶, ...)
    #[serde(default)]
    pub relationship: String,
    /// Free-form location (province/city/district), optional
    #[serde(default)]
    pub location: serde_json::Value,
    /// Source date-time string as entered by the caller
    #[serde(default)]
    pub datetime: String,
}

// ============================================================================
// CHART
// ============================================================================

/// The computed Four Pillars chart for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Fixed order: 年柱, 月柱, 日柱, 时柱
    pub pillars: [Pillar; 4],
    pub elements_count: ElementTally,
    pub yin: u8,
    pub yang: u8,
    #[serde(flatten)]
    pub subject: Subject,
}

impl Chart {
    /// Compute the chart for a date-time.
    ///
    /// Pure and total: any structurally valid `NaiveDateTime` yields a
    /// chart, and identical inputs yield identical charts.
    pub fn compute(dt: NaiveDateTime) -> Self {
        let (y_stem, y_branch) = year_pillar(dt);
        let (d_stem, d_branch) = day_pillar(dt);
        let (m_stem, m_branch) = month_pillar(y_stem, dt);
        let (h_stem, h_branch) = hour_pillar(d_stem, dt);

        let pillars = [
            Pillar::new(PillarRole::Year, y_stem, y_branch),
            Pillar::new(PillarRole::Month, m_stem, m_branch),
            Pillar::new(PillarRole::Day, d_stem, d_branch),
            Pillar::new(PillarRole::Hour, h_stem, h_branch),
        ];

        let mut elements_count = ElementTally::default();
        let mut yin = 0;
        let mut yang = 0;
        for pillar in &pillars {
            let stem = HEAVENLY_STEMS[pillar.stem_index];
            let branch = EARTHLY_BRANCHES[pillar.branch_index];
            elements_count.increment(stem.element);
            elements_count.increment(branch.element);
            if stem.polarity.is_yin() { yin += 1 } else { yang += 1 }
            if branch.polarity.is_yin() { yin += 1 } else { yang += 1 }
        }

        Chart {
            pillars,
            elements_count,
            yin,
            yang,
            subject: Subject::default(),
        }
    }

    /// Attach caller metadata, consuming the chart.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = subject;
        self
    }

    /// Pillar by role.
    pub fn pillar(&self, role: PillarRole) -> &Pillar {
        match role {
            PillarRole::Year => &self.pillars[0],
            PillarRole::Month => &self.pillars[1],
            PillarRole::Day => &self.pillars[2],
            PillarRole::Hour => &self.pillars[3],
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
