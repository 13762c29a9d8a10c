// Sexagenary Cycle Tables - Stems, Branches, Elements, Polarity
// The 10 heavenly stems and 12 earthly branches with their fixed
// element / yin-yang attributes. Everything here is a process-lifetime
// constant; all cyclic indexing goes through the normalizing helpers.

use serde::{Deserialize, Serialize};

// ============================================================================
// ELEMENT
// ============================================================================

/// One of the five elements (Wu Xing) attached to every stem and branch.
///
/// Serialized as the Chinese glyph (木/火/土/金/水) to match the original
/// wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    #[serde(rename = "木")]
    Wood,
    #[serde(rename = "火")]
    Fire,
    #[serde(rename = "土")]
    Earth,
    #[serde(rename = "金")]
    Metal,
    #[serde(rename = "水")]
    Water,
}

/// All five elements in traditional order.
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// Chinese glyph for this element.
    pub fn glyph(&self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }

    /// English name (for CLI output and logs).
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
        }
    }
}

// ============================================================================
// POLARITY
// ============================================================================

/// Yin/yang polarity attached to every stem and branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    #[serde(rename = "阳")]
    Yang,
    #[serde(rename = "阴")]
    Yin,
}

impl Polarity {
    pub fn glyph(&self) -> &'static str {
        match self {
            Polarity::Yang => "阳",
            Polarity::Yin => "阴",
        }
    }

    pub fn is_yin(&self) -> bool {
        matches!(self, Polarity::Yin)
    }
}

// ============================================================================
// HEAVENLY STEMS
// ============================================================================

/// One entry of the heavenly stem table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StemInfo {
    /// Chinese glyph (甲, 乙, ...)
    pub name: &'static str,
    pub element: Element,
    pub polarity: Polarity,
}

/// The 10 heavenly stems, indexed 0-9 (甲=0 .. 癸=9).
pub const HEAVENLY_STEMS: [StemInfo; 10] = [
    StemInfo { name: "甲", element: Element::Wood, polarity: Polarity::Yang },
    StemInfo { name: "乙", element: Element::Wood, polarity: Polarity::Yin },
    StemInfo { name: "丙", element: Element::Fire, polarity: Polarity::Yang },
    StemInfo { name: "丁", element: Element::Fire, polarity: Polarity::Yin },
    StemInfo { name: "戊", element: Element::Earth, polarity: Polarity::Yang },
    StemInfo { name: "己", element: Element::Earth, polarity: Polarity::Yin },
    StemInfo { name: "庚", element: Element::Metal, polarity: Polarity::Yang },
    StemInfo { name: "辛", element: Element::Metal, polarity: Polarity::Yin },
    StemInfo { name: "壬", element: Element::Water, polarity: Polarity::Yang },
    StemInfo { name: "癸", element: Element::Water, polarity: Polarity::Yin },
];

// ============================================================================
// EARTHLY BRANCHES
// ============================================================================

/// One entry of the earthly branch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchInfo {
    /// Chinese glyph (子, 丑, ...)
    pub name: &'static str,
    pub element: Element,
    pub polarity: Polarity,
}

/// The 12 earthly branches, indexed 0-11 (子=0 .. 亥=11).
pub const EARTHLY_BRANCHES: [BranchInfo; 12] = [
    BranchInfo { name: "子", element: Element::Water, polarity: Polarity::Yang },
    BranchInfo { name: "丑", element: Element::Earth, polarity: Polarity::Yin },
    BranchInfo { name: "寅", element: Element::Wood, polarity: Polarity::Yang },
    BranchInfo { name: "卯", element: Element::Wood, polarity: Polarity::Yin },
    BranchInfo { name: "辰", element: Element::Earth, polarity: Polarity::Yang },
    BranchInfo { name: "巳", element: Element::Fire, polarity: Polarity::Yin },
    BranchInfo { name: "午", element: Element::Fire, polarity: Polarity::Yang },
    BranchInfo { name: "未", element: Element::Earth, polarity: Polarity::Yin },
    BranchInfo { name: "申", element: Element::Metal, polarity: Polarity::Yang },
    BranchInfo { name: "酉", element: Element::Metal, polarity: Polarity::Yin },
    BranchInfo { name: "戌", element: Element::Earth, polarity: Polarity::Yang },
    BranchInfo { name: "亥", element: Element::Water, polarity: Polarity::Yin },
];

// ============================================================================
// CYCLIC INDEX HELPERS
// ============================================================================

/// Normalize any signed offset to a stem index in [0, 10).
///
/// `rem_euclid` keeps results non-negative for dates before the reference
/// anchors (pre-1984 years, pre-1900 days).
pub fn stem_index(offset: i64) -> usize {
    offset.rem_euclid(10) as usize
}

/// Normalize any signed offset to a branch index in [0, 12).
pub fn branch_index(offset: i64) -> usize {
    offset.rem_euclid(12) as usize
}

// ============================================================================
// TESTS
// ============================================================================
