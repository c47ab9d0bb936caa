//! Fee schedule: time-of-day pricing for the toll zone

use chrono::NaiveTime;

/// One pricing bracket: a half-open `[start, end)` time-of-day interval
/// mapped to an integer fee in local currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub fee: u32,
}

impl FeeInterval {
    /// Whether `time` falls inside this bracket. Start is inclusive,
    /// end is exclusive.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// Ordered list of disjoint pricing brackets. Times outside every bracket
/// are free (the overnight gap, 18:30–06:00).
///
/// Immutable process-wide constant; safe for unlimited concurrent readers.
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    intervals: Vec<FeeInterval>,
}

/// The 2013 Gothenburg tariff: ((start h, m), (end h, m), fee) with
/// half-open bounds.
const TARIFF_2013: &[((u32, u32), (u32, u32), u32)] = &[
    ((6, 0), (6, 30), 8),
    ((6, 30), (7, 0), 13),
    ((7, 0), (8, 0), 18),
    ((8, 0), (8, 30), 13),
    ((8, 30), (15, 0), 8),
    ((15, 0), (15, 30), 13),
    ((15, 30), (17, 0), 18),
    ((17, 0), (18, 0), 13),
    ((18, 0), (18, 30), 8),
];

impl FeeSchedule {
    /// Build a schedule from explicit brackets. Brackets must be sorted
    /// and disjoint; lookup returns the first match.
    pub fn new(intervals: Vec<FeeInterval>) -> Self {
        Self { intervals }
    }

    /// Fee for a non-exempt passage at `time`. Returns 0 for times outside
    /// every bracket.
    pub fn fee_for(&self, time: NaiveTime) -> u32 {
        self.intervals
            .iter()
            .find(|interval| interval.contains(time))
            .map(|interval| interval.fee)
            .unwrap_or(0)
    }

    /// The pricing brackets, in schedule order.
    pub fn intervals(&self) -> &[FeeInterval] {
        &self.intervals
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        let intervals = TARIFF_2013
            .iter()
            .map(|&((sh, sm), (eh, em), fee)| FeeInterval {
                // hours/minutes are compile-time constants within 0..24/0..60
                start: NaiveTime::from_hms_opt(sh, sm, 0).unwrap(),
                end: NaiveTime::from_hms_opt(eh, em, 0).unwrap(),
                fee,
            })
            .collect();
        Self { intervals }
    }
}
