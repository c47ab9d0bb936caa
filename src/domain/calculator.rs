//! Daily congestion tax evaluation
//!
//! Composes three pure pieces: the exemption check (weekend, holiday,
//! toll-free category), the fee schedule lookup, and the interval
//! grouper that bills near-in-time passages as one event.

use chrono::{Duration, NaiveDateTime};

use super::calendar::TollCalendar;
use super::error::{DomainError, DomainResult};
use super::tariff::FeeSchedule;
use super::vehicle::VehicleCategory;

/// Tunable billing limits. Canonical 2013 values: cap 60, window 60 min.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxPolicy {
    /// Cap on the summed fee for one calendar day.
    pub daily_maximum: u32,
    /// Width of a single-charge group: passages closer than this to the
    /// group's anchor are billed as one event.
    pub single_charge_window_minutes: i64,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            daily_maximum: 60,
            single_charge_window_minutes: 60,
        }
    }
}

/// One chargeable event in a day's breakdown: a run of passages within
/// the single-charge window of its anchor, billed once at the highest
/// member fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeGroup {
    /// Earliest passage in the group; the window is measured from here.
    pub anchor: NaiveDateTime,
    /// Number of passages billed together.
    pub passage_count: usize,
    /// The charged fee: the maximum member fee.
    pub fee: u32,
}

/// Per-group breakdown of one day's tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub groups: Vec<ChargeGroup>,
    /// Sum of group fees before capping.
    pub subtotal: u32,
    /// Final amount, clamped to the daily maximum.
    pub total: u32,
}

/// Evaluator for the daily congestion tax.
///
/// Pure and side-effect free: the fee schedule and holiday calendar are
/// read-only, so one instance can be shared across any number of
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct TaxCalculator {
    schedule: FeeSchedule,
    calendar: TollCalendar,
    policy: TaxPolicy,
}

impl TaxCalculator {
    pub fn new(schedule: FeeSchedule, calendar: TollCalendar, policy: TaxPolicy) -> Self {
        Self {
            schedule,
            calendar,
            policy,
        }
    }

    /// Calculator with the canonical tables and a custom policy.
    pub fn with_policy(policy: TaxPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    pub fn calendar(&self) -> &TollCalendar {
        &self.calendar
    }

    pub fn policy(&self) -> TaxPolicy {
        self.policy
    }

    /// Whether no fee applies to a single passage: weekend or holiday
    /// date, toll-free vehicle category, or no vehicle supplied.
    pub fn is_exempt(&self, passage: NaiveDateTime, vehicle: Option<VehicleCategory>) -> bool {
        if self.calendar.is_toll_free(passage.date()) {
            return true;
        }
        match vehicle {
            // absent vehicle is fully exempt, documented policy
            None => true,
            Some(category) => category.is_toll_free(),
        }
    }

    /// Fee for one passage: 0 if exempt, otherwise the schedule lookup.
    pub fn toll_fee(&self, passage: NaiveDateTime, vehicle: Option<VehicleCategory>) -> u32 {
        if self.is_exempt(passage, vehicle) {
            return 0;
        }
        self.schedule.fee_for(passage.time())
    }

    /// Total congestion tax for one day of passages.
    ///
    /// The list need not be sorted. Empty input yields 0. Passages
    /// spanning more than one calendar date are a caller error.
    pub fn daily_tax(
        &self,
        vehicle: Option<VehicleCategory>,
        passages: &[NaiveDateTime],
    ) -> DomainResult<u32> {
        if passages.is_empty() {
            return Ok(0);
        }
        self.check_single_day(passages)?;

        let mut total = 0u32;
        for group in group_passages(passages, self.single_charge_window()) {
            total += self.group_fee(&group, vehicle);
            if total >= self.policy.daily_maximum {
                return Ok(self.policy.daily_maximum);
            }
        }
        Ok(total)
    }

    /// Like [`daily_tax`](Self::daily_tax), but reports the per-group
    /// charges alongside the capped total.
    pub fn daily_tax_breakdown(
        &self,
        vehicle: Option<VehicleCategory>,
        passages: &[NaiveDateTime],
    ) -> DomainResult<TaxBreakdown> {
        if passages.is_empty() {
            return Ok(TaxBreakdown {
                groups: Vec::new(),
                subtotal: 0,
                total: 0,
            });
        }
        self.check_single_day(passages)?;

        let groups: Vec<ChargeGroup> = group_passages(passages, self.single_charge_window())
            .into_iter()
            .map(|group| ChargeGroup {
                anchor: group[0],
                passage_count: group.len(),
                fee: self.group_fee(&group, vehicle),
            })
            .collect();
        let subtotal = groups.iter().map(|g| g.fee).sum();
        Ok(TaxBreakdown {
            groups,
            subtotal,
            total: subtotal.min(self.policy.daily_maximum),
        })
    }

    /// The charged fee of one group: the maximum member fee.
    fn group_fee(&self, group: &[NaiveDateTime], vehicle: Option<VehicleCategory>) -> u32 {
        group
            .iter()
            .map(|&passage| self.toll_fee(passage, vehicle))
            .max()
            .unwrap_or(0)
    }

    fn single_charge_window(&self) -> Duration {
        Duration::minutes(self.policy.single_charge_window_minutes)
    }

    fn check_single_day(&self, passages: &[NaiveDateTime]) -> DomainResult<()> {
        let first = passages[0].date();
        match passages.iter().find(|p| p.date() != first) {
            Some(other) => Err(DomainError::CrossDayPassages {
                first: first.min(other.date()),
                second: first.max(other.date()),
            }),
            None => Ok(()),
        }
    }
}

/// Partition same-day passages into single-charge groups.
///
/// Sorts ascending, anchors the first group at the earliest passage, and
/// appends each subsequent passage to the current group while its elapsed
/// time since the group's anchor is strictly less than `window`;
/// otherwise it closes the group and anchors a new one. Anchors never
/// shift mid-group, so boundaries are monotonic and the result is an
/// exact ordered partition of the input.
pub fn group_passages(passages: &[NaiveDateTime], window: Duration) -> Vec<Vec<NaiveDateTime>> {
    if passages.is_empty() {
        return Vec::new();
    }
    let mut sorted = passages.to_vec();
    sorted.sort_unstable();

    let mut groups = Vec::new();
    let mut anchor = sorted[0];
    // the anchor always belongs to its own group, so no group can be
    // empty even with a non-positive window
    let mut current = vec![anchor];
    for &passage in &sorted[1..] {
        if passage - anchor < window {
            current.push(passage);
        } else {
            groups.push(current);
            anchor = passage;
            current = vec![passage];
        }
    }
    groups.push(current);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn passage(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn passages(strings: &[&str]) -> Vec<NaiveDateTime> {
        strings.iter().map(|s| passage(s)).collect()
    }

    fn calculator() -> TaxCalculator {
        TaxCalculator::default()
    }

    const CAR: Option<VehicleCategory> = Some(VehicleCategory::Car);

    #[test]
    fn off_schedule_hour_is_free() {
        let tax = calculator()
            .daily_tax(CAR, &passages(&["2013-01-14 21:00:00"]))
            .unwrap();
        assert_eq!(tax, 0);
    }

    #[test]
    fn single_passage_scenarios_from_tariff() {
        let calc = calculator();
        for (when, expected) in [
            ("2013-02-07 06:23:27", 8),
            ("2013-02-07 06:33:27", 13),
            ("2013-02-07 07:33:27", 18),
            ("2013-02-07 08:23:27", 13),
            ("2013-03-26 14:25:00", 8),
        ] {
            let tax = calc.daily_tax(CAR, &passages(&[when])).unwrap();
            assert_eq!(tax, expected, "{when}");
        }
    }

    #[test]
    fn two_distant_passages_are_both_charged() {
        // 06:23 → 8 and 15:27 → 13, more than an hour apart
        let tax = calculator()
            .daily_tax(CAR, &passages(&["2013-02-07 06:23:27", "2013-02-07 15:27:00"]))
            .unwrap();
        assert_eq!(tax, 21);
    }

    #[test]
    fn near_passages_are_charged_once_at_the_highest_fee() {
        // 06:50 → 13 and 07:10 → 18, 20 minutes apart: one charge of 18
        let tax = calculator()
            .daily_tax(CAR, &passages(&["2013-02-07 06:50:00", "2013-02-07 07:10:00"]))
            .unwrap();
        assert_eq!(tax, 18);
    }

    #[test]
    fn passages_exactly_one_window_apart_are_charged_separately() {
        // elapsed time equals the window, so the second opens a new group
        let tax = calculator()
            .daily_tax(CAR, &passages(&["2013-02-07 07:00:00", "2013-02-07 08:00:00"]))
            .unwrap();
        assert_eq!(tax, 18 + 13);
    }

    #[test]
    fn busy_day_is_capped_at_the_daily_maximum() {
        let day = passages(&[
            "2013-02-08 06:27:00",
            "2013-02-08 06:20:27",
            "2013-02-08 14:35:00",
            "2013-02-08 15:29:00",
            "2013-02-08 15:47:00",
            "2013-02-08 16:01:00",
            "2013-02-08 16:48:00",
            "2013-02-08 17:49:00",
            "2013-02-08 18:29:00",
            "2013-02-08 18:35:00",
        ]);
        assert_eq!(calculator().daily_tax(CAR, &day).unwrap(), 60);
    }

    #[test]
    fn result_is_invariant_under_input_order() {
        let calc = calculator();
        let mut day = passages(&[
            "2013-02-07 15:27:00",
            "2013-02-07 06:23:27",
            "2013-02-07 16:20:00",
        ]);
        let expected = calc.daily_tax(CAR, &day).unwrap();
        day.reverse();
        assert_eq!(calc.daily_tax(CAR, &day).unwrap(), expected);
        day.swap(0, 1);
        assert_eq!(calc.daily_tax(CAR, &day).unwrap(), expected);
    }

    #[test]
    fn empty_day_costs_nothing() {
        assert_eq!(calculator().daily_tax(CAR, &[]).unwrap(), 0);
    }

    #[test]
    fn holiday_is_free() {
        let tax = calculator()
            .daily_tax(CAR, &passages(&["2013-03-28 14:07:27"]))
            .unwrap();
        assert_eq!(tax, 0);
    }

    #[test]
    fn weekend_is_free() {
        let calc = calculator();
        // 2013-02-09/10 are Saturday and Sunday
        for day in ["2013-02-09 08:45:00", "2013-02-10 08:45:00"] {
            assert_eq!(calc.daily_tax(CAR, &passages(&[day])).unwrap(), 0);
        }
    }

    #[test]
    fn toll_free_categories_pay_nothing() {
        let calc = calculator();
        let day = passages(&["2013-02-08 08:35:00"]);
        for category in [
            VehicleCategory::Motorcycle,
            VehicleCategory::Bus,
            VehicleCategory::Emergency,
            VehicleCategory::Diplomat,
            VehicleCategory::Foreign,
            VehicleCategory::Military,
        ] {
            assert_eq!(calc.daily_tax(Some(category), &day).unwrap(), 0);
        }
    }

    #[test]
    fn absent_vehicle_is_exempt() {
        let tax = calculator()
            .daily_tax(None, &passages(&["2013-02-08 08:35:00"]))
            .unwrap();
        assert_eq!(tax, 0);
    }

    #[test]
    fn cross_day_input_is_rejected() {
        let err = calculator()
            .daily_tax(CAR, &passages(&["2013-02-08 08:35:00", "2013-02-09 08:35:00"]))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::CrossDayPassages {
                first: NaiveDate::from_ymd_opt(2013, 2, 8).unwrap(),
                second: NaiveDate::from_ymd_opt(2013, 2, 9).unwrap(),
            }
        );
    }

    #[test]
    fn breakdown_partitions_all_passages() {
        let day = passages(&[
            "2013-02-08 06:20:27",
            "2013-02-08 06:27:00",
            "2013-02-08 14:35:00",
            "2013-02-08 15:29:00",
        ]);
        let breakdown = calculator().daily_tax_breakdown(CAR, &day).unwrap();
        let counted: usize = breakdown.groups.iter().map(|g| g.passage_count).sum();
        assert_eq!(counted, day.len());
        // 06:20+06:27 as one group of 8, 14:35+15:29 as one group of 13
        assert_eq!(breakdown.groups.len(), 2);
        assert_eq!(breakdown.groups[0].fee, 8);
        assert_eq!(breakdown.groups[1].fee, 13);
        assert_eq!(breakdown.subtotal, 21);
        assert_eq!(breakdown.total, 21);
    }

    #[test]
    fn breakdown_reports_subtotal_above_the_cap() {
        let day = passages(&[
            "2013-02-08 06:20:27",
            "2013-02-08 07:25:00",
            "2013-02-08 08:30:00",
            "2013-02-08 15:35:00",
            "2013-02-08 16:40:00",
        ]);
        let breakdown = calculator().daily_tax_breakdown(CAR, &day).unwrap();
        assert!(breakdown.subtotal > 60);
        assert_eq!(breakdown.total, 60);
    }

    #[test]
    fn custom_policy_changes_cap_and_window() {
        let calc = TaxCalculator::with_policy(TaxPolicy {
            daily_maximum: 30,
            single_charge_window_minutes: 120,
        });
        // 07:00 and 08:30 fall in one 120-minute group: one charge of 18
        let close = passages(&["2013-02-07 07:00:00", "2013-02-07 08:30:00"]);
        assert_eq!(calc.daily_tax(CAR, &close).unwrap(), 18);
        // three distant 18-fee passages clamp to the lowered cap
        let distant = passages(&[
            "2013-02-07 07:00:00",
            "2013-02-07 15:35:00",
            "2013-02-07 07:00:01",
        ]);
        assert_eq!(calc.daily_tax(CAR, &distant).unwrap(), 30);
    }

    #[test]
    fn zero_window_breakdown_charges_each_passage_separately() {
        // a misconfigured [tax] section can hand the calculator a
        // non-positive window; every passage then stands alone
        let calc = TaxCalculator::with_policy(TaxPolicy {
            daily_maximum: 60,
            single_charge_window_minutes: 0,
        });
        let breakdown = calc
            .daily_tax_breakdown(CAR, &passages(&["2013-02-07 07:30:00"]))
            .unwrap();
        assert_eq!(breakdown.groups.len(), 1);
        assert_eq!(breakdown.groups[0].passage_count, 1);
        assert_eq!(breakdown.total, 18);

        let two = passages(&["2013-02-07 07:30:00", "2013-02-07 07:45:00"]);
        let breakdown = calc.daily_tax_breakdown(CAR, &two).unwrap();
        assert_eq!(breakdown.groups.len(), 2);
        assert_eq!(breakdown.total, 36);
    }

    mod grouping {
        use super::*;

        #[test]
        fn groups_are_measured_from_the_anchor_not_the_previous_passage() {
            // 06:00, 06:40, 07:10: 07:10 is 30 min after 06:40 but 70 min
            // after the anchor, so it starts a new group
            let day = passages(&[
                "2013-02-07 06:00:00",
                "2013-02-07 06:40:00",
                "2013-02-07 07:10:00",
            ]);
            let groups = group_passages(&day, Duration::minutes(60));
            assert_eq!(groups.len(), 2);
            assert_eq!(groups[0], passages(&["2013-02-07 06:00:00", "2013-02-07 06:40:00"]));
            assert_eq!(groups[1], passages(&["2013-02-07 07:10:00"]));
        }

        #[test]
        fn elapsed_time_is_not_a_minutes_component_comparison() {
            // 65 minutes apart but with equal minute components; a
            // wrapping minutes-only comparison would merge these
            let day = passages(&["2013-02-07 06:15:00", "2013-02-07 07:20:00"]);
            let groups = group_passages(&day, Duration::minutes(60));
            assert_eq!(groups.len(), 2);
        }

        #[test]
        fn unsorted_input_is_sorted_before_grouping() {
            let day = passages(&[
                "2013-02-07 07:10:00",
                "2013-02-07 06:00:00",
                "2013-02-07 06:40:00",
            ]);
            let groups = group_passages(&day, Duration::minutes(60));
            assert_eq!(groups[0][0], passage("2013-02-07 06:00:00"));
        }

        #[test]
        fn single_passage_forms_one_group() {
            let day = passages(&["2013-02-07 06:00:00"]);
            assert_eq!(group_passages(&day, Duration::minutes(60)), vec![day]);
        }

        #[test]
        fn empty_input_yields_no_groups() {
            assert!(group_passages(&[], Duration::minutes(60)).is_empty());
        }

        #[test]
        fn non_positive_window_yields_singleton_groups() {
            let day = passages(&[
                "2013-02-07 07:30:00",
                "2013-02-07 07:30:00",
                "2013-02-07 08:00:00",
            ]);
            for minutes in [0, -60] {
                let groups = group_passages(&day, Duration::minutes(minutes));
                assert_eq!(groups.len(), 3);
                assert!(groups.iter().all(|group| group.len() == 1));
            }
        }

        #[test]
        fn seconds_matter_at_the_window_edge() {
            // 59:59 elapsed is inside the window; 60:00 is not
            let inside = passages(&["2013-02-07 06:00:00", "2013-02-07 06:59:59"]);
            assert_eq!(group_passages(&inside, Duration::minutes(60)).len(), 1);
            let outside = passages(&["2013-02-07 06:00:00", "2013-02-07 07:00:00"]);
            assert_eq!(group_passages(&outside, Duration::minutes(60)).len(), 2);
        }
    }
}
