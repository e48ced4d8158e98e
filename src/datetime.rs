//! Regex fallback for dates, start times and end times.
//!
//! Each field has an ordered list of rules. A rule is a pattern plus a
//! normaliser; the first rule whose first match normalises wins, and a
//! match that does not normalise hands over to the next rule.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use regex::{Captures, Regex};
use tracing::debug;

use crate::entities::Found;
use crate::resolver::DateTimeResolver;

// Clock-time body shared by the end-marker patterns.
const CLOCK: &str = r"\d{1,2}\s*(?::\s*\d{2})?\s*(?:[ap]m\b|[ap]\.m\.|hrs\b|hours?\b)";

const WEEKDAY_ALT: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

const DURATION_N: &str = r"\d+(?:\.\d+)?|an?|one";

/// Longest meeting a bare "N hours" phrase may describe.
const MAX_DURATION_HOURS: f64 = 24.0;

type Normalise<T> = fn(&str, &dyn DateTimeResolver) -> Option<T>;

pub struct Rule<T> {
    pub name: &'static str,
    re: Regex,
    normalise: Normalise<T>,
}

impl<T> Rule<T> {
    fn new(name: &'static str, pattern: &str, normalise: Normalise<T>) -> Self {
        Rule {
            name,
            re: Regex::new(&format!("(?i){pattern}")).unwrap(),
            normalise,
        }
    }

    /// Capture group 1 if the pattern has one, else the whole match.
    fn subject<'t>(caps: &Captures<'t>) -> Option<&'t str> {
        caps.get(1).or_else(|| caps.get(0)).map(|m| m.as_str())
    }

    fn apply(&self, text: &str, resolver: &dyn DateTimeResolver) -> Option<Found<T>> {
        let caps = self.re.captures(text)?;
        let source = Self::subject(&caps)?;
        (self.normalise)(source, resolver).map(|value| Found {
            value,
            source: source.to_string(),
        })
    }
}

fn first_match<T>(rules: &[Rule<T>], text: &str, resolver: &dyn DateTimeResolver) -> Option<Found<T>> {
    rules.iter().find_map(|rule| {
        let hit = rule.apply(text, resolver);
        if hit.is_some() {
            debug!(rule = rule.name, "regex fallback matched");
        }
        hit
    })
}

fn as_date(raw: &str, resolver: &dyn DateTimeResolver) -> Option<NaiveDate> {
    resolver.resolve_date(raw)
}

fn as_time(raw: &str, resolver: &dyn DateTimeResolver) -> Option<NaiveTime> {
    resolver.resolve_time(raw)
}

fn as_hours(raw: &str, _: &dyn DateTimeResolver) -> Option<f64> {
    let hours = match raw.to_lowercase().as_str() {
        "a" | "an" | "one" => 1.0,
        n => n.parse().ok()?,
    };
    (hours > 0.0 && hours < MAX_DURATION_HOURS).then_some(hours)
}

// ── Rule families ────────────────────────────────────────────────────────

static DATE_RULES: LazyLock<Vec<Rule<NaiveDate>>> = LazyLock::new(|| {
    vec![
        Rule::new("relative-weekday", &format!(r"\b(?:next|this)\s+(?:{WEEKDAY_ALT})\b"), as_date),
        Rule::new("weekday", &format!(r"\b(?:{WEEKDAY_ALT})\b"), as_date),
        Rule::new("tomorrow", r"\btomorrow\b", as_date),
        Rule::new("today", r"\btoday\b", as_date),
        Rule::new("next-week", r"\bnext\s+week\b", as_date),
        Rule::new("next-month", r"\bnext\s+month\b", as_date),
    ]
});

static TIME_RULES: LazyLock<Vec<Rule<NaiveTime>>> = LazyLock::new(|| {
    vec![
        Rule::new("meridiem", r"\b\d{1,2}\s*(?::\s*\d{2})?\s*[ap]m\b", as_time),
        Rule::new("dotted-meridiem", r"\b\d{1,2}\s*(?::\s*\d{2})?\s*[ap]\.m\.", as_time),
        Rule::new("hours", r"\b\d{1,2}\s*(?::\s*\d{2})?\s*(?:hrs|hours?)\b", as_time),
    ]
});

static END_RULES: LazyLock<Vec<Rule<NaiveTime>>> = LazyLock::new(|| {
    vec![
        Rule::new("until", &format!(r"\buntil\s+({CLOCK})"), as_time),
        Rule::new("to", &format!(r"\bto\s+({CLOCK})"), as_time),
        Rule::new("ending", &format!(r"\bending\s+(?:(?:at|by)\s+)?({CLOCK})"), as_time),
        Rule::new("ends", &format!(r"\bend(?:s|ing)?\s+(?:(?:at|by)\s+)?({CLOCK})"), as_time),
        Rule::new(
            "range",
            &format!(r"\b(?:from|starting|begins|beginning)\b.*\s+(?:to|until|til|till)\s+({CLOCK})"),
            as_time,
        ),
    ]
});

static DURATION_RULES: LazyLock<Vec<Rule<f64>>> = LazyLock::new(|| {
    vec![
        Rule::new("for-hours", &format!(r"\bfor\s+({DURATION_N})\s+(?:hour|hr)s?\b"), as_hours),
        Rule::new("hours-long", &format!(r"\b({DURATION_N})\s+(?:hour|hr)s?\s+(?:long|duration)"), as_hours),
        Rule::new("bare-hours", r"\b(\d+(?:\.\d+)?)\s+(?:hour|hr)s?\b", as_hours),
    ]
});

// ── Extraction ───────────────────────────────────────────────────────────

pub fn find_date(text: &str, resolver: &dyn DateTimeResolver) -> Option<Found<NaiveDate>> {
    first_match(&DATE_RULES, text, resolver)
}

pub fn find_time(text: &str, resolver: &dyn DateTimeResolver) -> Option<Found<NaiveTime>> {
    first_match(&TIME_RULES, text, resolver)
}

/// End of the event starting at `start`: an explicit end marker if any,
/// otherwise start plus a stated duration, wrapping past midnight.
pub fn find_end_time(
    text: &str,
    start: NaiveTime,
    resolver: &dyn DateTimeResolver,
) -> Option<Found<NaiveTime>> {
    if let Some(end) = first_match(&END_RULES, text, resolver) {
        return Some(end);
    }
    let duration = first_match(&DURATION_RULES, text, resolver)?;
    let minutes = (duration.value * 60.0).round() as i64;
    let (value, _) = start.overflowing_add_signed(TimeDelta::minutes(minutes));
    Some(Found {
        value,
        source: duration.source,
    })
}
