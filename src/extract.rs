//! Single-pass extraction of a task record from one sentence.

use std::sync::LazyLock;

use regex::Regex;
use task_types::{ExtractionResult, LegacyRecord, Priority};
use tracing::debug;

use crate::annotation::Annotator;
use crate::resolver::DateTimeResolver;
use crate::{datetime, entities, location, task};

static RE_PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(urgent|high-priority|low-priority)\b").unwrap());

/// Composes the extraction stages over an annotator and a date/time
/// resolver. Holds no per-call state; one instance serves any number of
/// calls, from any thread if both collaborators are reentrant.
pub struct TaskExtractor<A, R> {
    annotator: A,
    resolver: R,
}

impl<A: Annotator, R: DateTimeResolver> TaskExtractor<A, R> {
    pub fn new(annotator: A, resolver: R) -> Self {
        TaskExtractor { annotator, resolver }
    }

    /// Derive the full record. Never fails; missing signals leave fields
    /// empty and the task falls back to a placeholder.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let resolver: &dyn DateTimeResolver = &self.resolver;
        let doc = self.annotator.annotate(text);

        // Named entities first, regex families only for what is still missing.
        let collected = entities::collect(&doc, &self.resolver);
        let date = collected.date.or_else(|| datetime::find_date(text, resolver));
        let time = collected.time.or_else(|| datetime::find_time(text, resolver));
        let end_time = time
            .as_ref()
            .and_then(|start| datetime::find_end_time(text, start.value, resolver));

        let locations = location::locate(&doc, &self.annotator, collected.locations);

        let phrase = task::extract_phrase(&doc);
        let excluded: Vec<&str> = collected
            .participants
            .iter()
            .chain(&locations)
            .map(String::as_str)
            .chain(date.as_ref().map(|f| f.source.as_str()))
            .chain(time.as_ref().map(|f| f.source.as_str()))
            .chain(end_time.as_ref().map(|f| f.source.as_str()))
            .collect();
        let task = task::clean(&phrase, &doc, &excluded);

        debug!(
            %phrase,
            %task,
            participants = collected.participants.len(),
            locations = locations.len(),
            has_date = date.is_some(),
            has_time = time.is_some(),
            "extracted"
        );

        ExtractionResult {
            task: Some(task),
            participants: collected.participants,
            date: date.map(|f| f.value),
            time: time.map(|f| f.value),
            end_time: end_time.map(|f| f.value),
            locations,
        }
    }

    /// The older record shape: no end time, plus priority and the raw text.
    pub fn extract_legacy(&self, text: &str) -> LegacyRecord {
        LegacyRecord::from_extraction(text, self.extract(text), detect_priority(text))
    }
}

/// Last priority keyword in the text, `Normal` if there is none.
pub fn detect_priority(text: &str) -> Priority {
    RE_PRIORITY
        .find_iter(text)
        .filter_map(|m| Priority::from_keyword(m.as_str()))
        .last()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::fixture::{doc, FakeAnnotator};
    use crate::annotation::Doc;
    use crate::resolver::RuleResolver;
    use crate::rules;
    use chrono::{NaiveDate, NaiveTime};

    // 2026-10-16 is a Friday.
    fn resolver() -> RuleResolver {
        RuleResolver::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 10, d)
    }

    fn at(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn office_doc() -> Doc {
        doc(
            &[
                ("Call", "call", "VERB", "ROOT", 0, false),
                ("John", "John", "PROPN", "dobj", 0, false),
                ("at", "at", "ADP", "prep", 0, true),
                ("the", "the", "DET", "det", 4, true),
                ("office", "office", "NOUN", "pobj", 2, false),
                ("tomorrow", "tomorrow", "NOUN", "npadvmod", 0, false),
                ("at", "at", "ADP", "prep", 0, true),
                ("3pm", "3pm", "NOUN", "pobj", 6, false),
                ("for", "for", "ADP", "prep", 0, true),
                ("an", "an", "DET", "det", 10, true),
                ("hour", "hour", "NOUN", "pobj", 8, false),
            ],
            &[(1, 2), (3, 5), (7, 8), (9, 11)],
            &[("PERSON", 1, 2), ("DATE", 5, 6), ("TIME", 7, 8), ("TIME", 9, 11)],
        )
    }

    fn meeting_doc() -> Doc {
        doc(
            &[
                ("urgent", "urgent", "ADJ", "amod", 1, false),
                ("meeting", "meeting", "NOUN", "ROOT", 1, false),
                ("with", "with", "ADP", "prep", 1, true),
                ("Sarah", "Sarah", "PROPN", "pobj", 2, false),
                ("in", "in", "ADP", "prep", 1, true),
                ("New", "New", "PROPN", "compound", 6, false),
                ("York", "York", "PROPN", "pobj", 4, false),
                ("next", "next", "ADJ", "amod", 8, false),
                ("Monday", "Monday", "PROPN", "npadvmod", 1, false),
            ],
            &[(0, 2), (3, 4), (5, 7)],
            &[("PERSON", 3, 4), ("GPE", 5, 7), ("DATE", 7, 9)],
        )
    }

    fn schedule_doc() -> Doc {
        doc(
            &[
                ("schedule", "schedule", "VERB", "ROOT", 0, false),
                ("a", "a", "DET", "det", 2, true),
                ("call", "call", "NOUN", "dobj", 0, false),
                ("to", "to", "PART", "aux", 4, true),
                ("discuss", "discuss", "VERB", "relcl", 2, false),
                ("the", "the", "DET", "det", 6, true),
                ("project", "project", "NOUN", "dobj", 4, false),
                ("from", "from", "ADP", "prep", 4, true),
                ("2pm", "2pm", "NOUN", "pobj", 7, false),
                ("to", "to", "ADP", "prep", 7, true),
                ("4pm", "4pm", "NOUN", "pobj", 9, false),
            ],
            &[(1, 3), (5, 7)],
            &[("TIME", 8, 9), ("TIME", 10, 11)],
        )
    }

    fn fake_extractor(docs: Vec<Doc>) -> TaskExtractor<FakeAnnotator, RuleResolver> {
        let annotator = docs.into_iter().fold(FakeAnnotator::default(), FakeAnnotator::with);
        TaskExtractor::new(annotator, resolver())
    }

    #[test]
    fn test_office_call() {
        let ex = fake_extractor(vec![office_doc()]);
        let r = ex.extract("Call John at the office tomorrow at 3pm for an hour");
        assert_eq!(r.task.as_deref(), Some("Call"));
        assert_eq!(r.participants, vec!["John"]);
        assert_eq!(r.locations, vec!["the office"]);
        assert_eq!(r.date, day(17));
        assert_eq!(r.time, at(15, 0));
        assert_eq!(r.end_time, at(16, 0));
    }

    #[test]
    fn test_meeting_without_verb() {
        let ex = fake_extractor(vec![meeting_doc()]);
        let r = ex.extract("urgent meeting with Sarah in New York next Monday");
        assert_eq!(r.task.as_deref(), Some("Urgent meeting"));
        assert_eq!(r.participants, vec!["Sarah"]);
        assert_eq!(r.locations, vec!["New York"]);
        assert_eq!(r.date, day(19));
        assert_eq!(r.time, None);
        assert_eq!(r.end_time, None);
    }

    #[test]
    fn test_empty_text() {
        let r = fake_extractor(Vec::new()).extract("");
        assert_eq!(r.task.as_deref(), Some("Task"));
        assert_eq!(r, ExtractionResult { task: Some("Task".into()), ..Default::default() });
    }

    #[test]
    fn test_end_time_from_marker() {
        let ex = fake_extractor(vec![schedule_doc()]);
        let r = ex.extract("schedule a call to discuss the project from 2pm to 4pm");
        assert_eq!(r.task.as_deref(), Some("Schedule call"));
        assert_eq!(r.time, at(14, 0));
        assert_eq!(r.end_time, at(16, 0));
        assert!(r.locations.is_empty());
    }

    #[test]
    fn test_entity_date_beats_regex_date() {
        let d = doc(
            &[
                ("finish", "finish", "VERB", "ROOT", 0, false),
                ("slides", "slide", "NOUN", "dobj", 0, false),
                ("tomorrow", "tomorrow", "NOUN", "npadvmod", 0, false),
                ("before", "before", "ADP", "prep", 0, true),
                ("Monday", "Monday", "PROPN", "pobj", 3, false),
            ],
            &[(1, 2)],
            &[("DATE", 2, 3)],
        );
        let r = fake_extractor(vec![d]).extract("finish slides tomorrow before Monday");
        assert_eq!(r.date, day(17));
        assert_eq!(r.task.as_deref(), Some("Finish slides"));
    }

    #[test]
    fn test_regex_fills_missing_entities() {
        // The fake tags every word as a plain noun with no entities.
        let r = fake_extractor(Vec::new()).extract("dentist on Tuesday at 9:30am until 10:15am");
        assert_eq!(r.date, day(20));
        assert_eq!(r.time, at(9, 30));
        assert_eq!(r.end_time, at(10, 15));
    }

    #[test]
    fn test_no_end_time_without_start() {
        let r = fake_extractor(Vec::new()).extract("workshop for 2 hours on friday");
        assert_eq!(r.time, None);
        assert_eq!(r.end_time, None);
        assert_eq!(r.date, day(16));
    }

    #[test]
    fn test_legacy_record() {
        let ex = fake_extractor(vec![meeting_doc()]);
        let text = "urgent meeting with Sarah in New York next Monday";
        let legacy = ex.extract_legacy(text);
        assert_eq!(legacy.priority, Priority::Urgent);
        assert_eq!(legacy.description.as_deref(), Some(text));
        assert_eq!(legacy.locations, vec!["New York"]);
    }

    #[test]
    fn test_priority_last_keyword_wins() {
        assert_eq!(detect_priority("urgent, well actually low-priority"), Priority::LowPriority);
        assert_eq!(detect_priority("HIGH-PRIORITY fix"), Priority::HighPriority);
        assert_eq!(detect_priority("water plants"), Priority::Normal);
    }

    #[test]
    fn test_rule_annotator_end_to_end() {
        let ex = TaskExtractor::new(rules::shared(), resolver());

        let r = ex.extract("Call John at the office tomorrow at 3pm for an hour");
        assert_eq!(r.task.as_deref(), Some("Call"));
        assert_eq!(r.participants, vec!["John"]);
        assert_eq!(r.locations, vec!["the office"]);
        assert_eq!((r.date, r.time, r.end_time), (day(17), at(15, 0), at(16, 0)));

        let r = ex.extract("urgent meeting with Sarah in New York next Monday");
        assert_eq!(r.participants, vec!["Sarah"]);
        assert_eq!(r.locations, vec!["New York"]);
        assert_eq!(r.date, day(19));

        let r = ex.extract("schedule a call to discuss the project from 2pm to 4pm");
        assert_eq!(r.task.as_deref(), Some("Schedule call"));
        assert_eq!((r.time, r.end_time), (at(14, 0), at(16, 0)));
    }

    #[test]
    fn test_out_of_range_date_is_left_empty() {
        let ex = TaskExtractor::new(rules::shared(), resolver());
        for text in [
            "renew passport in 100000000 days",
            "renew passport in 4294967295 days",
            "file taxes in 20000000 weeks",
        ] {
            let r = ex.extract(text);
            assert_eq!(r.date, None, "{text:?}");
            assert!(r.task.is_some());
        }
    }

    #[test]
    fn test_invariants_over_samples() {
        let ex = TaskExtractor::new(rules::shared(), resolver());
        let samples = [
            "",
            "   ",
            "pick up coffee at Blue Bottle Cafe in San Francisco",
            "go to the gym at the gym near the park",
            "email Dr. Smith about the report by Friday 5pm",
            "lunch lunch lunch",
            "?!",
            "renew passport in 100000000 days",
            "file taxes in 20000000 weeks",
        ];
        for text in samples {
            let r = ex.extract(text);
            let task = r.task_or_placeholder();
            assert!(!task.is_empty(), "{text:?}");
            for (i, a) in r.locations.iter().enumerate() {
                for (j, b) in r.locations.iter().enumerate() {
                    assert!(i == j || !a.contains(b.as_str()), "{text:?}: {a} / {b}");
                }
            }
        }
    }
}
