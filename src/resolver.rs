//! Natural-language date and time normalisation.
//!
//! The extraction core hands phrases such as "next Monday" or "3:30 p.m."
//! to a [`DateTimeResolver`] and only keeps what comes back; a `None` is a
//! silent miss, never an error.

use std::sync::LazyLock;

use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveTime, Weekday};
use regex::Regex;

pub trait DateTimeResolver: Send + Sync {
    fn resolve_date(&self, phrase: &str) -> Option<NaiveDate>;
    fn resolve_time(&self, phrase: &str) -> Option<NaiveTime>;
}

impl<T: DateTimeResolver + ?Sized> DateTimeResolver for &T {
    fn resolve_date(&self, phrase: &str) -> Option<NaiveDate> {
        (**self).resolve_date(phrase)
    }

    fn resolve_time(&self, phrase: &str) -> Option<NaiveTime> {
        (**self).resolve_time(phrase)
    }
}

// ── Patterns ─────────────────────────────────────────────────────────────

static RE_ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());

// US order: month/day[/year]
static RE_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").unwrap());

const MONTH_ALT: &str =
    r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

// "March 3rd, 2027", "jan 5"
static RE_MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?P<month>{MONTH_ALT})\.?\s+(?P<day>\d{{1,2}})(?:st|nd|rd|th)?(?:,?\s*(?P<year>\d{{4}}))?\b"
    ))
    .unwrap()
});

// "3rd of March", "15 june 2027"
static RE_DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?P<day>\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<month>{MONTH_ALT})\b(?:,?\s*(?P<year>\d{{4}}))?"
    ))
    .unwrap()
});

static RE_RELATIVE_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(day after tomorrow|tomorrow|today|tonight|yesterday)\b").unwrap()
});

static RE_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(?P<rel>next|this|last|coming)\s+)?(?P<day>monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    )
    .unwrap()
});

static RE_RELATIVE_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(next|this|last)\s+(week|month|year)\b").unwrap());

static RE_IN_N: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bin\s+(\d+|an?|one|two|three|four|five|six|seven)\s+(day|week|month)s?\b").unwrap()
});

static RE_NAMED_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(noon|midday|midnight)\b").unwrap());

static RE_MERIDIEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})(?:[:.]\s*(\d{2}))?\s*(a\.?\s?m\b\.?|p\.?\s?m\b\.?)").unwrap()
});

// Military notation: "15 hrs", "1530 hrs"
static RE_HRS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}):?(\d{2})?\s*hrs\b").unwrap());

static RE_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([01]?\d|2[0-3])\s*:\s*([0-5]\d)\b").unwrap());

static RE_OCLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})\s*o'?\s?clock\b").unwrap());

// ── Rule-based resolver ──────────────────────────────────────────────────

/// Resolves relative expressions against a fixed reference day.
#[derive(Debug, Clone, Copy)]
pub struct RuleResolver {
    reference: NaiveDate,
}

impl Default for RuleResolver {
    fn default() -> Self {
        Self::today()
    }
}

impl RuleResolver {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Upcoming `target`: `0..=6` days ahead, or `1..=7` if `strict`.
    fn upcoming(&self, target: Weekday, strict: bool) -> Option<NaiveDate> {
        let current = self.reference.weekday().num_days_from_monday() as i64;
        let wanted = target.num_days_from_monday() as i64;
        let mut ahead = (wanted - current).rem_euclid(7) as u64;
        if strict && ahead == 0 {
            ahead = 7;
        }
        self.reference.checked_add_days(Days::new(ahead))
    }

    fn previous(&self, target: Weekday) -> Option<NaiveDate> {
        let current = self.reference.weekday().num_days_from_monday() as i64;
        let wanted = target.num_days_from_monday() as i64;
        let mut back = (current - wanted).rem_euclid(7) as u64;
        if back == 0 {
            back = 7;
        }
        self.reference.checked_sub_days(Days::new(back))
    }

    fn calendar_date(&self, month: &str, day: &str, year: Option<&str>) -> Option<NaiveDate> {
        let month = month_number(month)?;
        let day = day.parse().ok()?;
        let year = match year {
            Some(y) => y.parse().ok()?,
            None => self.reference.year(),
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

impl DateTimeResolver for RuleResolver {
    fn resolve_date(&self, phrase: &str) -> Option<NaiveDate> {
        let lower = phrase.to_lowercase();

        if let Some(c) = RE_ISO.captures(&lower) {
            return NaiveDate::from_ymd_opt(c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?);
        }

        if let Some(c) = RE_NUMERIC.captures(&lower) {
            let year = match c.get(3) {
                Some(y) => {
                    let y: i32 = y.as_str().parse().ok()?;
                    if y < 100 { 2000 + y } else { y }
                }
                None => self.reference.year(),
            };
            return NaiveDate::from_ymd_opt(year, c[1].parse().ok()?, c[2].parse().ok()?);
        }

        for re in [&*RE_MONTH_DAY, &*RE_DAY_MONTH] {
            if let Some(c) = re.captures(&lower) {
                return self.calendar_date(
                    &c["month"],
                    &c["day"],
                    c.name("year").map(|m| m.as_str()),
                );
            }
        }

        if let Some(c) = RE_RELATIVE_DAY.captures(&lower) {
            let r = self.reference;
            return match &c[1] {
                "day after tomorrow" => r.checked_add_days(Days::new(2)),
                "tomorrow" => r.checked_add_days(Days::new(1)),
                "yesterday" => r.checked_sub_days(Days::new(1)),
                _ => Some(r),
            };
        }

        if let Some(c) = RE_WEEKDAY.captures(&lower) {
            let day = c["day"].parse::<Weekday>().ok()?;
            return match c.name("rel").map(|m| m.as_str()) {
                Some("next") | Some("coming") => self.upcoming(day, true),
                Some("last") => self.previous(day),
                _ => self.upcoming(day, false),
            };
        }

        if let Some(c) = RE_RELATIVE_PERIOD.captures(&lower) {
            let r = self.reference;
            return match (&c[1], &c[2]) {
                ("this", _) => Some(r),
                ("next", "week") => r.checked_add_days(Days::new(7)),
                ("last", "week") => r.checked_sub_days(Days::new(7)),
                ("next", "month") => r.checked_add_months(Months::new(1)),
                ("last", "month") => r.checked_sub_months(Months::new(1)),
                ("next", _) => r.checked_add_months(Months::new(12)),
                _ => r.checked_sub_months(Months::new(12)),
            };
        }

        if let Some(c) = RE_IN_N.captures(&lower) {
            // Counts beyond chrono's calendar range resolve to nothing.
            let n = small_number(&c[1])?;
            let r = self.reference;
            return match &c[2] {
                "day" => r.checked_add_days(Days::new(n.into())),
                "week" => r.checked_add_days(Days::new(u64::from(n) * 7)),
                _ => r.checked_add_months(Months::new(n)),
            };
        }

        None
    }

    fn resolve_time(&self, phrase: &str) -> Option<NaiveTime> {
        let lower = phrase.to_lowercase();

        if let Some(c) = RE_NAMED_TIME.captures(&lower) {
            let hour = if &c[1] == "midnight" { 0 } else { 12 };
            return NaiveTime::from_hms_opt(hour, 0, 0);
        }

        if let Some(c) = RE_MERIDIEM.captures(&lower) {
            let hour: u32 = c[1].parse().ok()?;
            let minute: u32 = c.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
            if !(1..=12).contains(&hour) {
                return None;
            }
            let hour = match (c[3].starts_with('p'), hour) {
                (true, 12) => 12,
                (true, h) => h + 12,
                (false, 12) => 0,
                (false, h) => h,
            };
            return NaiveTime::from_hms_opt(hour, minute, 0);
        }

        if let Some(c) = RE_HRS.captures(&lower) {
            let minute: u32 = c.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
            return NaiveTime::from_hms_opt(c[1].parse().ok()?, minute, 0);
        }

        if let Some(c) = RE_CLOCK.captures(&lower) {
            return NaiveTime::from_hms_opt(c[1].parse().ok()?, c[2].parse().ok()?, 0);
        }

        if let Some(c) = RE_OCLOCK.captures(&lower) {
            return NaiveTime::from_hms_opt(c[1].parse().ok()?, 0, 0);
        }

        None
    }
}

fn month_number(name: &str) -> Option<u32> {
    let n = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}

fn small_number(word: &str) -> Option<u32> {
    match word {
        "a" | "an" | "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        digits => digits.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2026-10-16 is a Friday.
    fn resolver() -> RuleResolver {
        RuleResolver::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn time(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    #[test]
    fn test_relative_days() {
        let r = resolver();
        assert_eq!(r.resolve_date("tomorrow"), date(2026, 10, 17));
        assert_eq!(r.resolve_date("Today"), date(2026, 10, 16));
        assert_eq!(r.resolve_date("the day after tomorrow"), date(2026, 10, 18));
        assert_eq!(r.resolve_date("yesterday"), date(2026, 10, 15));
    }

    #[test]
    fn test_weekdays() {
        let r = resolver();
        assert_eq!(r.resolve_date("next Monday"), date(2026, 10, 19));
        assert_eq!(r.resolve_date("monday"), date(2026, 10, 19));
        assert_eq!(r.resolve_date("this Friday"), date(2026, 10, 16));
        assert_eq!(r.resolve_date("next friday"), date(2026, 10, 23));
        assert_eq!(r.resolve_date("last Wednesday"), date(2026, 10, 14));
    }

    #[test]
    fn test_periods() {
        let r = resolver();
        assert_eq!(r.resolve_date("next week"), date(2026, 10, 23));
        assert_eq!(r.resolve_date("next month"), date(2026, 11, 16));
        assert_eq!(r.resolve_date("in 3 days"), date(2026, 10, 19));
        assert_eq!(r.resolve_date("in two weeks"), date(2026, 10, 30));
    }

    #[test]
    fn test_huge_counts_resolve_to_none() {
        let r = resolver();
        assert_eq!(r.resolve_date("in 100000000 days"), None);
        assert_eq!(r.resolve_date("in 4294967295 days"), None);
        assert_eq!(r.resolve_date("in 20000000 weeks"), None);
        assert_eq!(r.resolve_date("in 4294967295 months"), None);
        // does not fit in u32 at all
        assert_eq!(r.resolve_date("in 99999999999 days"), None);
    }

    #[test]
    fn test_calendar_edge_does_not_panic() {
        let r = RuleResolver::new(NaiveDate::MAX);
        assert_eq!(r.resolve_date("tomorrow"), None);
        assert_eq!(r.resolve_date("next week"), None);
        assert_eq!(r.resolve_date("today"), Some(NaiveDate::MAX));
        let r = RuleResolver::new(NaiveDate::MIN);
        assert_eq!(r.resolve_date("yesterday"), None);
    }

    #[test]
    fn test_absolute_dates() {
        let r = resolver();
        assert_eq!(r.resolve_date("2027-01-05"), date(2027, 1, 5));
        assert_eq!(r.resolve_date("March 3rd, 2027"), date(2027, 3, 3));
        assert_eq!(r.resolve_date("Jan 5"), date(2026, 1, 5));
        assert_eq!(r.resolve_date("the 15th of June"), date(2026, 6, 15));
        assert_eq!(r.resolve_date("12/25"), date(2026, 12, 25));
        assert_eq!(r.resolve_date("2/30/2027"), None);
    }

    #[test]
    fn test_unresolvable_dates() {
        let r = resolver();
        assert_eq!(r.resolve_date("an hour"), None);
        assert_eq!(r.resolve_date("soon"), None);
        assert_eq!(r.resolve_date(""), None);
    }

    #[test]
    fn test_meridiem_times() {
        let r = resolver();
        assert_eq!(r.resolve_time("3pm"), time(15, 0));
        assert_eq!(r.resolve_time("3:30 P.M."), time(15, 30));
        assert_eq!(r.resolve_time("12 am"), time(0, 0));
        assert_eq!(r.resolve_time("12pm"), time(12, 0));
        assert_eq!(r.resolve_time("9 a.m."), time(9, 0));
        assert_eq!(r.resolve_time("13pm"), None);
    }

    #[test]
    fn test_clock_and_named_times() {
        let r = resolver();
        assert_eq!(r.resolve_time("15:45"), time(15, 45));
        assert_eq!(r.resolve_time("noon"), time(12, 0));
        assert_eq!(r.resolve_time("midnight"), time(0, 0));
        assert_eq!(r.resolve_time("15 hrs"), time(15, 0));
        assert_eq!(r.resolve_time("1530 hrs"), time(15, 30));
        assert_eq!(r.resolve_time("4 o'clock"), time(4, 0));
    }

    #[test]
    fn test_durations_are_not_times() {
        let r = resolver();
        assert_eq!(r.resolve_time("an hour"), None);
        assert_eq!(r.resolve_time("2 hours"), None);
    }

    #[test]
    fn test_time_range_takes_first_clock() {
        assert_eq!(resolver().resolve_time("2pm to 4pm"), time(14, 0));
    }
}
