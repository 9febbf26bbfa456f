//! Surcharge resolution for a single care event.
//!
//! Fixed-date rules are evaluated in the priority order of
//! [`FIXED_DATE_RULES`]. The first one that fires covers the whole event
//! and supersedes every other rule, windowed ones included. Only when no
//! fixed-date rule fires are the [`WINDOWED_RULES`] intersected with the
//! event, each independently.

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calendar::{CalendarDate, HolidayCalendar, TimeUnit};
use crate::models::{CareEvent, Surcharge, SurchargePolicy, SurchargeRule, SurchargeWindow};

use super::intersection::Interval;

/// A surcharge keyed to a calendar day.
#[derive(Debug, Clone, Copy)]
pub struct FixedDateRule {
    /// The rule this entry evaluates.
    pub rule: SurchargeRule,
    rate: fn(&SurchargePolicy) -> Decimal,
    applies: fn(&CalendarDate, &dyn HolidayCalendar) -> bool,
}

impl FixedDateRule {
    /// Returns the policy's rate for this rule.
    pub fn rate(&self, policy: &SurchargePolicy) -> Decimal {
        (self.rate)(policy)
    }

    /// Returns true if the rule's day predicate holds for `date`.
    pub fn applies(&self, date: &CalendarDate, holidays: &dyn HolidayCalendar) -> bool {
        (self.applies)(date, holidays)
    }
}

/// A surcharge keyed to a daily clock-time window.
#[derive(Debug, Clone, Copy)]
pub struct WindowedRule {
    /// The rule this entry evaluates.
    pub rule: SurchargeRule,
    rate: fn(&SurchargePolicy) -> Decimal,
    window: fn(&SurchargePolicy) -> Option<SurchargeWindow>,
}

impl WindowedRule {
    /// Returns the policy's rate for this rule.
    pub fn rate(&self, policy: &SurchargePolicy) -> Decimal {
        (self.rate)(policy)
    }

    /// Returns the policy's window for this rule, if configured.
    pub fn window(&self, policy: &SurchargePolicy) -> Option<SurchargeWindow> {
        (self.window)(policy)
    }
}

/// Fixed-date rules, highest priority first.
pub const FIXED_DATE_RULES: [FixedDateRule; 5] = [
    FixedDateRule {
        rule: SurchargeRule::TwentyFifthOfDecember,
        rate: twenty_fifth_of_december_rate,
        applies: is_twenty_fifth_of_december,
    },
    FixedDateRule {
        rule: SurchargeRule::FirstOfMay,
        rate: first_of_may_rate,
        applies: is_first_of_may,
    },
    FixedDateRule {
        rule: SurchargeRule::PublicHoliday,
        rate: public_holiday_rate,
        applies: is_public_holiday,
    },
    FixedDateRule {
        rule: SurchargeRule::Saturday,
        rate: saturday_rate,
        applies: is_saturday,
    },
    FixedDateRule {
        rule: SurchargeRule::Sunday,
        rate: sunday_rate,
        applies: is_sunday,
    },
];

/// Windowed rules, in output order.
pub const WINDOWED_RULES: [WindowedRule; 2] = [
    WindowedRule {
        rule: SurchargeRule::Evening,
        rate: evening_rate,
        window: SurchargePolicy::evening_window,
    },
    WindowedRule {
        rule: SurchargeRule::Custom,
        rate: custom_rate,
        window: SurchargePolicy::custom_window,
    },
];

/// Resolves the surcharges that apply to `event` under `policy`.
///
/// Returns a single whole-event surcharge when a fixed-date rule fires,
/// otherwise one windowed surcharge per window the event overlaps
/// (evening before custom), otherwise nothing. Rates of zero or below
/// never fire.
///
/// # Example
///
/// ```
/// use care_pay_engine::calculation::resolve_surcharges;
/// use care_pay_engine::calendar::HolidayTable;
/// use care_pay_engine::models::{CareEvent, EventType, SurchargePolicy, SurchargeRule};
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let policy = SurchargePolicy {
///     saturday: Decimal::new(20, 0),
///     ..Default::default()
/// };
/// // 2026-01-17 is a Saturday
/// let event = CareEvent {
///     id: Uuid::new_v4(),
///     customer_id: Uuid::new_v4(),
///     subscription_id: Uuid::new_v4(),
///     event_type: EventType::Intervention,
///     start_date: DateTime::parse_from_rfc3339("2026-01-17T09:00:00+01:00").unwrap(),
///     end_date: DateTime::parse_from_rfc3339("2026-01-17T11:00:00+01:00").unwrap(),
///     cancel: None,
///     surcharge: None,
/// };
///
/// let surcharges = resolve_surcharges(&event, &policy, &HolidayTable::france());
/// assert_eq!(surcharges.len(), 1);
/// assert_eq!(surcharges[0].rule, SurchargeRule::Saturday);
/// assert_eq!(surcharges[0].percentage, Decimal::new(20, 0));
/// assert!(surcharges[0].span.is_none());
/// ```
pub fn resolve_surcharges(
    event: &CareEvent,
    policy: &SurchargePolicy,
    holidays: &dyn HolidayCalendar,
) -> Vec<Surcharge> {
    let start = event.start();

    if let Some(fixed) = FIXED_DATE_RULES
        .iter()
        .find(|r| r.rate(policy) > Decimal::ZERO && r.applies(&start, holidays))
    {
        let percentage = fixed.rate(policy);
        debug!(
            event_id = %event.id,
            rule = %fixed.rule,
            percentage = %percentage,
            "Fixed-date surcharge applies to whole event"
        );
        return vec![Surcharge::whole_event(fixed.rule, percentage)];
    }

    let event_span = Interval::new(event.start_date, event.end_date);
    WINDOWED_RULES
        .iter()
        .filter_map(|windowed| {
            let percentage = windowed.rate(policy);
            if percentage <= Decimal::ZERO {
                return None;
            }
            let window = anchored_window(&windowed.window(policy)?, &start)?;
            let overlap = event_span.intersection(&window)?;
            debug!(
                event_id = %event.id,
                rule = %windowed.rule,
                percentage = %percentage,
                start_hour = %overlap.start,
                end_hour = %overlap.end,
                "Windowed surcharge applies"
            );
            Some(Surcharge::windowed(
                windowed.rule,
                percentage,
                overlap.start,
                overlap.end,
            ))
        })
        .collect()
}

/// Resolves surcharges using the event's own policy when it carries one,
/// `company_policy` otherwise.
pub fn resolve_event_surcharges(
    event: &CareEvent,
    company_policy: &SurchargePolicy,
    holidays: &dyn HolidayCalendar,
) -> Vec<Surcharge> {
    let policy = event.surcharge.as_ref().unwrap_or(company_policy);
    resolve_surcharges(event, policy, holidays)
}

/// Anchors a daily window to the calendar day of `day`, rolling the end to
/// the next day when the window runs past midnight.
pub fn anchored_window(window: &SurchargeWindow, day: &CalendarDate) -> Option<Interval> {
    let start = window.start.on(day);
    let mut end = window.end.on(day);
    if window.crosses_midnight() {
        end = end.add(1, TimeUnit::Day);
    }
    Some(Interval::new(start.to_datetime()?, end.to_datetime()?))
}

fn twenty_fifth_of_december_rate(policy: &SurchargePolicy) -> Decimal {
    policy.twenty_fifth_of_december
}

fn first_of_may_rate(policy: &SurchargePolicy) -> Decimal {
    policy.first_of_may
}

fn public_holiday_rate(policy: &SurchargePolicy) -> Decimal {
    policy.public_holiday
}

fn saturday_rate(policy: &SurchargePolicy) -> Decimal {
    policy.saturday
}

fn sunday_rate(policy: &SurchargePolicy) -> Decimal {
    policy.sunday
}

fn evening_rate(policy: &SurchargePolicy) -> Decimal {
    policy.evening
}

fn custom_rate(policy: &SurchargePolicy) -> Decimal {
    policy.custom
}

fn is_day_of_year(date: &CalendarDate, month: u32, day: u32) -> bool {
    date.date_naive()
        .is_some_and(|d| d.month() == month && d.day() == day)
}

fn is_twenty_fifth_of_december(date: &CalendarDate, _: &dyn HolidayCalendar) -> bool {
    is_day_of_year(date, 12, 25)
}

fn is_first_of_may(date: &CalendarDate, _: &dyn HolidayCalendar) -> bool {
    is_day_of_year(date, 5, 1)
}

fn is_public_holiday(date: &CalendarDate, holidays: &dyn HolidayCalendar) -> bool {
    date.is_holiday(holidays)
}

fn is_saturday(date: &CalendarDate, _: &dyn HolidayCalendar) -> bool {
    date.weekday() == Some(6)
}

fn is_sunday(date: &CalendarDate, _: &dyn HolidayCalendar) -> bool {
    date.weekday() == Some(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{ClockTime, HolidayTable};
    use crate::models::EventType;
    use chrono::{DateTime, FixedOffset};
    use uuid::Uuid;

    fn at(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn time(value: &str) -> Option<ClockTime> {
        Some(value.parse().unwrap())
    }

    fn make_event(start: &str, end: &str) -> CareEvent {
        CareEvent {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            subscription_id: Uuid::new_v4(),
            event_type: EventType::Intervention,
            start_date: at(start),
            end_date: at(end),
            cancel: None,
            surcharge: None,
        }
    }

    fn full_policy() -> SurchargePolicy {
        SurchargePolicy {
            name: "full".to_string(),
            twenty_fifth_of_december: dec(100),
            first_of_may: dec(80),
            public_holiday: dec(50),
            saturday: dec(20),
            sunday: dec(30),
            evening: dec(10),
            evening_start_time: time("21:00"),
            evening_end_time: time("06:00"),
            custom: dec(5),
            custom_start_time: time("12:00"),
            custom_end_time: time("14:00"),
        }
    }

    #[test]
    fn test_priority_table_order() {
        let rules: Vec<SurchargeRule> = FIXED_DATE_RULES.iter().map(|r| r.rule).collect();
        assert_eq!(
            rules,
            vec![
                SurchargeRule::TwentyFifthOfDecember,
                SurchargeRule::FirstOfMay,
                SurchargeRule::PublicHoliday,
                SurchargeRule::Saturday,
                SurchargeRule::Sunday,
            ]
        );
        let windowed: Vec<SurchargeRule> = WINDOWED_RULES.iter().map(|r| r.rule).collect();
        assert_eq!(windowed, vec![SurchargeRule::Evening, SurchargeRule::Custom]);
    }

    #[test]
    fn test_saturday_only() {
        let policy = SurchargePolicy {
            saturday: dec(20),
            ..Default::default()
        };
        let event = make_event("2026-01-17T09:00:00+01:00", "2026-01-17T11:00:00+01:00");

        let surcharges = resolve_surcharges(&event, &policy, &HolidayTable::france());
        assert_eq!(surcharges, vec![Surcharge::whole_event(SurchargeRule::Saturday, dec(20))]);
    }

    #[test]
    fn test_christmas_beats_public_holiday() {
        // 2027-12-25 is a Saturday as well
        let event = make_event("2027-12-25T09:00:00+01:00", "2027-12-25T11:00:00+01:00");
        let surcharges = resolve_surcharges(&event, &full_policy(), &HolidayTable::france());
        assert_eq!(
            surcharges,
            vec![Surcharge::whole_event(SurchargeRule::TwentyFifthOfDecember, dec(100))]
        );
    }

    #[test]
    fn test_disabled_christmas_falls_through_to_public_holiday() {
        let policy = SurchargePolicy {
            twenty_fifth_of_december: Decimal::ZERO,
            ..full_policy()
        };
        let event = make_event("2027-12-25T09:00:00+01:00", "2027-12-25T11:00:00+01:00");
        let surcharges = resolve_surcharges(&event, &policy, &HolidayTable::france());
        assert_eq!(
            surcharges,
            vec![Surcharge::whole_event(SurchargeRule::PublicHoliday, dec(50))]
        );
    }

    #[test]
    fn test_first_of_may() {
        let event = make_event("2026-05-01T09:00:00+02:00", "2026-05-01T11:00:00+02:00");
        let surcharges = resolve_surcharges(&event, &full_policy(), &HolidayTable::france());
        assert_eq!(surcharges, vec![Surcharge::whole_event(SurchargeRule::FirstOfMay, dec(80))]);
    }

    #[test]
    fn test_public_holiday_beats_sunday() {
        // 2026-11-01 (Toussaint) is a Sunday
        let event = make_event("2026-11-01T09:00:00+01:00", "2026-11-01T11:00:00+01:00");
        let surcharges = resolve_surcharges(&event, &full_policy(), &HolidayTable::france());
        assert_eq!(surcharges, vec![Surcharge::whole_event(SurchargeRule::PublicHoliday, dec(50))]);
    }

    #[test]
    fn test_fixed_rule_suppresses_windowed_rules() {
        // Saturday evening: evening window would match, but Saturday wins.
        let event = make_event("2026-01-17T20:00:00+01:00", "2026-01-17T23:00:00+01:00");
        let surcharges = resolve_surcharges(&event, &full_policy(), &HolidayTable::france());
        assert_eq!(surcharges, vec![Surcharge::whole_event(SurchargeRule::Saturday, dec(20))]);
    }

    #[test]
    fn test_evening_window_rolls_to_next_day() {
        let policy = SurchargePolicy {
            evening: dec(10),
            evening_start_time: time("21:00"),
            evening_end_time: time("06:00"),
            ..Default::default()
        };
        // Thursday
        let event = make_event("2026-01-15T20:00:00+01:00", "2026-01-15T23:00:00+01:00");

        let surcharges = resolve_surcharges(&event, &policy, &HolidayTable::france());
        assert_eq!(
            surcharges,
            vec![Surcharge::windowed(
                SurchargeRule::Evening,
                dec(10),
                at("2026-01-15T21:00:00+01:00"),
                at("2026-01-15T23:00:00+01:00"),
            )]
        );
    }

    #[test]
    fn test_overnight_event_clipped_at_window_end() {
        let policy = SurchargePolicy {
            evening: dec(10),
            evening_start_time: time("21:00"),
            evening_end_time: time("06:00"),
            ..Default::default()
        };
        let event = make_event("2026-01-15T22:00:00+01:00", "2026-01-16T08:00:00+01:00");

        let surcharges = resolve_surcharges(&event, &policy, &HolidayTable::france());
        assert_eq!(surcharges.len(), 1);
        let span = surcharges[0].span.unwrap();
        assert_eq!(span.start_hour, at("2026-01-15T22:00:00+01:00"));
        assert_eq!(span.end_hour, at("2026-01-16T06:00:00+01:00"));
    }

    #[test]
    fn test_early_morning_event_uses_window_anchored_on_its_own_day() {
        let policy = SurchargePolicy {
            evening: dec(10),
            evening_start_time: time("21:00"),
            evening_end_time: time("06:00"),
            ..Default::default()
        };
        // The window is anchored on the 15th: 21:00 on the 15th to 06:00 on the 16th.
        let event = make_event("2026-01-15T02:00:00+01:00", "2026-01-15T05:00:00+01:00");
        assert!(resolve_surcharges(&event, &policy, &HolidayTable::france()).is_empty());
    }

    #[test]
    fn test_evening_and_custom_both_apply() {
        let policy = SurchargePolicy {
            custom_start_time: time("19:00"),
            custom_end_time: time("22:00"),
            ..full_policy()
        };
        let event = make_event("2026-01-15T20:00:00+01:00", "2026-01-15T23:00:00+01:00");

        let surcharges = resolve_surcharges(&event, &policy, &HolidayTable::france());
        assert_eq!(
            surcharges,
            vec![
                Surcharge::windowed(
                    SurchargeRule::Evening,
                    dec(10),
                    at("2026-01-15T21:00:00+01:00"),
                    at("2026-01-15T23:00:00+01:00"),
                ),
                Surcharge::windowed(
                    SurchargeRule::Custom,
                    dec(5),
                    at("2026-01-15T20:00:00+01:00"),
                    at("2026-01-15T22:00:00+01:00"),
                ),
            ]
        );
    }

    #[test]
    fn test_zero_and_negative_rates_never_fire() {
        let policy = SurchargePolicy {
            saturday: Decimal::ZERO,
            evening: dec(-10),
            evening_start_time: time("00:00"),
            evening_end_time: time("23:59"),
            ..Default::default()
        };
        let event = make_event("2026-01-17T20:00:00+01:00", "2026-01-17T23:00:00+01:00");
        assert!(resolve_surcharges(&event, &policy, &HolidayTable::france()).is_empty());
    }

    #[test]
    fn test_weekday_daytime_event_has_no_surcharge() {
        let event = make_event("2026-01-15T09:00:00+01:00", "2026-01-15T11:00:00+01:00");
        assert!(resolve_surcharges(&event, &full_policy(), &HolidayTable::france()).is_empty());
    }

    #[test]
    fn test_event_touching_window_start_has_no_surcharge() {
        let event = make_event("2026-01-15T19:00:00+01:00", "2026-01-15T21:00:00+01:00");
        let policy = SurchargePolicy {
            custom: Decimal::ZERO,
            ..full_policy()
        };
        assert!(resolve_surcharges(&event, &policy, &HolidayTable::france()).is_empty());
    }

    #[test]
    fn test_window_without_times_is_disabled() {
        let policy = SurchargePolicy {
            evening: dec(10),
            evening_start_time: time("21:00"),
            ..Default::default()
        };
        let event = make_event("2026-01-15T20:00:00+01:00", "2026-01-15T23:00:00+01:00");
        assert!(resolve_surcharges(&event, &policy, &HolidayTable::france()).is_empty());
    }

    #[test]
    fn test_event_override_policy_is_preferred() {
        let mut event = make_event("2026-01-17T09:00:00+01:00", "2026-01-17T11:00:00+01:00");
        event.surcharge = Some(SurchargePolicy {
            saturday: dec(40),
            ..Default::default()
        });

        let surcharges = resolve_event_surcharges(&event, &full_policy(), &HolidayTable::france());
        assert_eq!(surcharges, vec![Surcharge::whole_event(SurchargeRule::Saturday, dec(40))]);

        event.surcharge = None;
        let surcharges = resolve_event_surcharges(&event, &full_policy(), &HolidayTable::france());
        assert_eq!(surcharges, vec![Surcharge::whole_event(SurchargeRule::Saturday, dec(20))]);
    }

    #[test]
    fn test_anchored_window_same_day() {
        let window = SurchargeWindow {
            start: "12:00".parse().unwrap(),
            end: "14:00".parse().unwrap(),
        };
        let reference = CalendarDate::parse_iso("2026-01-15T09:00:00+01:00");
        let interval = anchored_window(&window, &reference).unwrap();
        assert_eq!(interval.start, at("2026-01-15T12:00:00+01:00"));
        assert_eq!(interval.end, at("2026-01-15T14:00:00+01:00"));
    }
}
