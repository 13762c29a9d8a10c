// Pillar Derivers - Gregorian date-time to sexagenary (stem, branch) pairs
//
// The four derivers follow the classical simplified rules:
// - Year: Feb 4 boundary (proxy for 立春), 1984 = 甲子 anchor
// - Day: whole days since 1900-01-01 (庚子 day)
// - Month: fixed solar-term boundary dates + Five Tigers rule
// - Hour: 2-hour branch windows from 23:00 + Five Rats rule
//
// Month boundaries are fixed Gregorian approximations of the solar terms,
// not astronomical values; they can drift by a day or two from the real
// terms. That approximation is intentional and kept as-is.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::cycle::{branch_index, stem_index};

// ============================================================================
// REFERENCE ANCHORS
// ============================================================================

/// 1984 was 甲子 (stem 0, branch 0).
pub const REFERENCE_YEAR: i32 = 1984;

/// Day-count reference: 1900-01-01 was a 庚子 day (stem 6, branch 0).
pub const DAY_REFERENCE: (i32, u32, u32) = (1900, 1, 1);
const DAY_REFERENCE_STEM: i64 = 6;
const DAY_REFERENCE_BRANCH: i64 = 0;

// ============================================================================
// MONTH BOUNDARY TABLE
// ============================================================================

/// Approximate Gregorian (month, day) onsets of the 12 BaZi months.
///
/// Entry 0 (立春, Feb 4) starts the 寅 month; each following entry starts the
/// next branch. The final entry (小寒, Jan 6) falls in the *following*
/// calendar year.
pub const MONTH_BOUNDARIES: [(u32, u32); 12] = [
    (2, 4),  // 立春 - 寅
    (3, 6),  // 惊蛰 - 卯
    (4, 5),  // 清明 - 辰
    (5, 5),  // 立夏 - 巳
    (6, 6),  // 芒种 - 午
    (7, 7),  // 小暑 - 未
    (8, 8),  // 立秋 - 申
    (9, 8),  // 白露 - 酉
    (10, 8), // 寒露 - 戌
    (11, 7), // 立冬 - 亥
    (12, 7), // 大雪 - 子
    (1, 6),  // 小寒 - 丑 (of next year)
];

/// Branch assigned when the date falls before 立春 (previous year's 丑 month).
const PRE_SPRING_BRANCH: usize = 1;

// ============================================================================
// YEAR PILLAR
// ============================================================================

/// Year pillar: (stem index, branch index).
///
/// Dates before Feb 4 belong to the previous pillar year. Any finite year is
/// accepted; offsets before 1984 normalize through `rem_euclid`.
pub fn year_pillar(dt: NaiveDateTime) -> (usize, usize) {
    let offset = (effective_year(dt) - REFERENCE_YEAR) as i64;
    (stem_index(offset), branch_index(offset))
}

/// The calendar year the date-time belongs to for year-pillar purposes.
pub fn effective_year(dt: NaiveDateTime) -> i32 {
    if dt.month() < 2 || (dt.month() == 2 && dt.day() < 4) {
        dt.year() - 1
    } else {
        dt.year()
    }
}

// ============================================================================
// DAY PILLAR
// ============================================================================

/// Day pillar: (stem index, branch index).
///
/// Counts whole calendar days elapsed since 1900-01-01 (a 庚子 day). Time of
/// day is ignored; dates before the reference yield negative counts, which
/// still resolve to non-negative indices.
pub fn day_pillar(dt: NaiveDateTime) -> (usize, usize) {
    let (y, m, d) = DAY_REFERENCE;
    // Fixed, always-valid calendar date.
    let reference = NaiveDate::from_ymd_opt(y, m, d).expect("valid reference date");
    let diff = dt.date().signed_duration_since(reference).num_days();
    (
        stem_index(DAY_REFERENCE_STEM + diff),
        branch_index(DAY_REFERENCE_BRANCH + diff),
    )
}

// ============================================================================
// MONTH PILLAR
// ============================================================================

/// Month pillar: (stem index, branch index).
///
/// Takes the year stem because the Five Tigers rule fixes the stem of the
/// 寅 month from it; later months increment from that start.
pub fn month_pillar(year_stem: usize, dt: NaiveDateTime) -> (usize, usize) {
    let branch = month_branch(dt);

    let start_stem = five_tigers_start(year_stem);
    let rel = (branch as i64 - 2).rem_euclid(12);
    let stem = stem_index(start_stem as i64 + rel);
    (stem, branch)
}

/// Month branch from the fixed boundary table.
///
/// Boundaries are half-open: the boundary date itself belongs to the month
/// it opens. Dates before 立春 get the previous year's 丑 branch.
pub fn month_branch(dt: NaiveDateTime) -> usize {
    let year = dt.year();
    let boundaries: Vec<NaiveDateTime> = MONTH_BOUNDARIES
        .iter()
        .enumerate()
        .map(|(i, &(m, d))| {
            // The January entry (index 11) belongs to the following year.
            let y = if i < 11 { year } else { year + 1 };
            NaiveDate::from_ymd_opt(y, m, d)
                .expect("valid boundary date")
                .and_hms_opt(0, 0, 0)
                .expect("valid boundary time")
        })
        .collect();

    if dt < boundaries[0] {
        return PRE_SPRING_BRANCH;
    }
    for i in 0..boundaries.len() - 1 {
        if boundaries[i] <= dt && dt < boundaries[i + 1] {
            // Boundary 0 opens the 寅 month (branch 2).
            return branch_index(2 + i as i64);
        }
    }
    PRE_SPRING_BRANCH
}

/// Five Tigers rule: stem of the 寅 month for a given year stem.
///
/// 甲/己 years start with 丙, 乙/庚 with 戊, 丙/辛 with 庚, 丁/壬 with 壬,
/// 戊/癸 with 甲. Out-of-range input (should never occur) defaults to 丙.
pub fn five_tigers_start(year_stem: usize) -> usize {
    match year_stem {
        0 | 5 => 2,
        1 | 6 => 4,
        2 | 7 => 6,
        3 | 8 => 8,
        4 | 9 => 0,
        _ => 2,
    }
}

// ============================================================================
// HOUR PILLAR
// ============================================================================

/// Hour pillar: (stem index, branch index).
///
/// The day splits into twelve 2-hour windows starting at 23:00 (子 covers
/// 23:00-00:59). Minutes within an hour never change the branch. The stem
/// follows the Five Rats rule from the day stem.
pub fn hour_pillar(day_stem: usize, dt: NaiveDateTime) -> (usize, usize) {
    let branch = hour_branch(dt.hour());
    let stem = stem_index(day_stem as i64 * 2 + branch as i64);
    (stem, branch)
}

/// Branch window for an hour of day (0-23).
pub fn hour_branch(hour: u32) -> usize {
    branch_index(((hour as i64) + 1) / 2)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    // ------------------------------------------------------------------
    // Year pillar
    // ------------------------------------------------------------------

    #[test]
    fn test_year_boundary_feb_4() {
        assert_eq!(effective_year(dt(1990, 2, 3, 12, 0)), 1989);
        assert_eq!(effective_year(dt(1990, 2, 4, 0, 0)), 1990);
        assert_eq!(effective_year(dt(1990, 1, 15, 12, 0)), 1989);
        assert_eq!(effective_year(dt(1990, 12, 31, 23, 59)), 1990);
    }

    #[test]
    fn test_year_reference_1984() {
        // 1984 = 甲子: stem 0, branch 0
        assert_eq!(year_pillar(dt(1984, 6, 15, 12, 0)), (0, 0));
    }

    #[test]
    fn test_year_1990_geng_wu() {
        // 1990 (after Feb 4) = 庚午: stem 6, branch 6
        assert_eq!(year_pillar(dt(1990, 5, 15, 14, 30)), (6, 6));
    }

    #[test]
    fn test_year_before_1984() {
        // 1970 = 庚戌: offset -14 -> stem 6, branch 10
        assert_eq!(year_pillar(dt(1970, 6, 15, 12, 0)), (6, 10));
    }

    #[test]
    fn test_year_far_past_and_future() {
        // Engine is total over any finite year
        let (s1, b1) = year_pillar(dt(1624, 6, 1, 0, 0));
        let (s2, b2) = year_pillar(dt(2344, 6, 1, 0, 0));
        assert!(s1 < 10 && b1 < 12);
        assert!(s2 < 10 && b2 < 12);
        // 1624 and 2344 are both 甲子 years (offset multiples of 60)
        assert_eq!((s1, b1), (0, 0));
        assert_eq!((s2, b2), (0, 0));
    }

    // ------------------------------------------------------------------
    // Day pillar
    // ------------------------------------------------------------------

    #[test]
    fn test_day_reference_1900() {
        // 1900-01-01 = 庚子: stem 6, branch 0
        assert_eq!(day_pillar(dt(1900, 1, 1, 12, 0)), (6, 0));
    }

    #[test]
    fn test_day_before_reference() {
        // 1899-12-31 = 己亥: diff -1 -> stem 5, branch 11
        assert_eq!(day_pillar(dt(1899, 12, 31, 8, 0)), (5, 11));
    }

    #[test]
    fn test_day_sexagenary_period() {
        let base = dt(1990, 5, 15, 10, 0);
        let later = dt(1990, 7, 14, 10, 0); // +60 days
        assert_eq!(day_pillar(base), day_pillar(later));
    }

    #[test]
    fn test_day_time_of_day_ignored() {
        assert_eq!(
            day_pillar(dt(1990, 5, 15, 0, 0)),
            day_pillar(dt(1990, 5, 15, 23, 59))
        );
    }

    #[test]
    fn test_day_golden_1990_05_15() {
        // 33006 days after 1900-01-01 -> 丙午: stem 2, branch 6
        assert_eq!(day_pillar(dt(1990, 5, 15, 14, 30)), (2, 6));
    }

    // ------------------------------------------------------------------
    // Month pillar
    // ------------------------------------------------------------------

    #[test]
    fn test_month_branch_before_spring() {
        // Jan 15 and Feb 3 both precede 立春 -> 丑 (1)
        assert_eq!(month_branch(dt(1990, 1, 15, 12, 0)), 1);
        assert_eq!(month_branch(dt(1990, 2, 3, 23, 59)), 1);
    }

    #[test]
    fn test_month_branch_boundary_inclusive() {
        // The boundary date itself opens the new month
        assert_eq!(month_branch(dt(1990, 2, 4, 0, 0)), 2);
        assert_eq!(month_branch(dt(1990, 3, 5, 23, 59)), 2);
        assert_eq!(month_branch(dt(1990, 3, 6, 0, 0)), 3);
    }

    #[test]
    fn test_month_branch_december_wraps_to_zi() {
        // [Dec 7, Jan 6 next year) -> 子 (0)
        assert_eq!(month_branch(dt(1990, 12, 7, 0, 0)), 0);
        assert_eq!(month_branch(dt(1990, 12, 31, 23, 59)), 0);
    }

    #[test]
    fn test_month_branch_monotonic_over_year() {
        // Sampling mid-interval dates walks branches 2,3,...,11,0
        let samples = [
            (2, 20, 2),
            (3, 20, 3),
            (4, 20, 4),
            (5, 20, 5),
            (6, 20, 6),
            (7, 20, 7),
            (8, 20, 8),
            (9, 20, 9),
            (10, 20, 10),
            (11, 20, 11),
            (12, 20, 0),
        ];
        for (m, d, expected) in samples {
            assert_eq!(month_branch(dt(1995, m, d, 12, 0)), expected, "{}-{}", m, d);
        }
    }

    #[test]
    fn test_five_tigers_total_and_congruent() {
        for stem in 0..10 {
            let start = five_tigers_start(stem);
            assert!(start < 10);
            assert_eq!(start, five_tigers_start((stem + 5) % 10));
        }
        assert_eq!(five_tigers_start(0), 2);
        assert_eq!(five_tigers_start(1), 4);
        assert_eq!(five_tigers_start(2), 6);
        assert_eq!(five_tigers_start(3), 8);
        assert_eq!(five_tigers_start(4), 0);
    }

    #[test]
    fn test_month_golden_1990_05_15() {
        // Year stem 6 (庚) starts 寅 at 戊 (4); May 15 is the 巳 month (5),
        // rel 3 -> stem 7 (辛). Month pillar 辛巳.
        assert_eq!(month_pillar(6, dt(1990, 5, 15, 14, 30)), (7, 5));
    }

    #[test]
    fn test_month_pillar_january_uses_previous_cycle() {
        // Jan 1990 precedes 立春: branch 1 (丑), rel 11 from 寅.
        // 1990-01-15 effective year 1989 (stem 5, 己) -> start 丙 (2),
        // stem (2 + 11) % 10 = 3 (丁). 丁丑 month.
        let (stem, branch) = month_pillar(5, dt(1990, 1, 15, 12, 0));
        assert_eq!((stem, branch), (3, 1));
    }

    // ------------------------------------------------------------------
    // Hour pillar
    // ------------------------------------------------------------------

    #[test]
    fn test_hour_branch_windows() {
        assert_eq!(hour_branch(23), 0); // 子 starts at 23:00
        assert_eq!(hour_branch(0), 0);
        assert_eq!(hour_branch(1), 1); // 丑
        assert_eq!(hour_branch(2), 1);
        assert_eq!(hour_branch(3), 2);
        assert_eq!(hour_branch(11), 6); // 午
        assert_eq!(hour_branch(12), 6);
        assert_eq!(hour_branch(22), 11); // 亥
    }

    #[test]
    fn test_hour_branch_constant_within_window() {
        assert_eq!(
            hour_pillar(3, dt(2000, 1, 1, 23, 15)),
            hour_pillar(3, dt(2000, 1, 1, 23, 45))
        );
    }

    #[test]
    fn test_hour_stem_independent_of_date() {
        let a = hour_pillar(4, dt(1950, 3, 3, 9, 0));
        let b = hour_pillar(4, dt(2020, 11, 11, 9, 59));
        assert_eq!(a, b);
    }

    #[test]
    fn test_hour_golden_1990_05_15() {
        // Day stem 2 (丙), 14:30 -> branch 7 (未), stem (2*2+7)%10 = 1 (乙)
        assert_eq!(hour_pillar(2, dt(1990, 5, 15, 14, 30)), (1, 7));
    }

    #[test]
    fn test_five_rats_formula() {
        // Stem depends only on (day stem, branch)
        for day_stem in 0..10usize {
            for hour in 0..24u32 {
                let (stem, branch) = hour_pillar(day_stem, dt(2001, 6, 1, hour, 30));
                assert_eq!(stem, (day_stem * 2 + branch) % 10);
            }
        }
    }
}
