//! Batch processing of `{"tasks": [{"text": ...}, ...]}` documents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use task_types::{BatchOutput, BatchResult, Record};
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::annotation::Annotator;
use crate::error::BatchError;
use crate::extract::TaskExtractor;
use crate::resolver::DateTimeResolver;

/// Which record layout to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shape {
    #[default]
    Full,
    Legacy,
}

#[derive(Debug, Deserialize)]
struct BatchInput {
    #[serde(default)]
    tasks: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// Outcome of a directory run. A failing file never stops the others.
#[derive(Debug, Default)]
pub struct DirSummary {
    pub succeeded: Vec<(PathBuf, BatchSummary)>,
    pub failed: Vec<(PathBuf, BatchError)>,
}

/// Extract every usable entry. Entries that are not objects, have no
/// string `text`, or whose text is blank are skipped.
pub fn process_entries<A: Annotator, R: DateTimeResolver>(
    extractor: &TaskExtractor<A, R>,
    entries: &[Value],
    shape: Shape,
) -> (BatchOutput, BatchSummary) {
    let mut output = BatchOutput::default();
    let mut summary = BatchSummary::default();

    for (index, entry) in entries.iter().enumerate() {
        let Some(text) = entry.get("text").and_then(Value::as_str) else {
            warn!(index, "skipping entry without a text field");
            summary.skipped += 1;
            continue;
        };
        if text.trim().is_empty() {
            warn!(index, "skipping entry with empty text");
            summary.skipped += 1;
            continue;
        }

        let record = match shape {
            Shape::Full => Record::Full(extractor.extract(text)),
            Shape::Legacy => Record::Legacy(extractor.extract_legacy(text)),
        };
        output.results.push(BatchResult {
            original_text: text.to_string(),
            extracted_entities: record,
        });
        summary.processed += 1;
    }

    (output, summary)
}

/// Read `input`, extract each task, write pretty JSON to `output`.
pub fn process_file<A: Annotator, R: DateTimeResolver>(
    extractor: &TaskExtractor<A, R>,
    input: &Path,
    output: &Path,
    shape: Shape,
) -> Result<BatchSummary, BatchError> {
    if !input.is_file() {
        return Err(BatchError::NotFound(input.to_path_buf()));
    }
    let raw = fs::read_to_string(input).map_err(|source| BatchError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let parsed: BatchInput = serde_json::from_str(&raw).map_err(|source| BatchError::Parse {
        path: input.to_path_buf(),
        source,
    })?;

    let (results, summary) = process_entries(extractor, &parsed.tasks, shape);

    let json = serde_json::to_string_pretty(&results)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| BatchError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(output, json).map_err(|source| BatchError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        processed = summary.processed,
        skipped = summary.skipped,
        "batch written"
    );
    Ok(summary)
}

/// Process every `*.json` directly inside `input_dir` into `output_dir`
/// under the same file name.
pub fn process_dir<A: Annotator, R: DateTimeResolver>(
    extractor: &TaskExtractor<A, R>,
    input_dir: &Path,
    output_dir: &Path,
    shape: Shape,
) -> Result<DirSummary, BatchError> {
    if !input_dir.is_dir() {
        return Err(BatchError::NotFound(input_dir.to_path_buf()));
    }
    fs::create_dir_all(output_dir).map_err(|source| BatchError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut summary = DirSummary::default();
    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let target = output_dir.join(entry.file_name());
        match process_file(extractor, path, &target, shape) {
            Ok(s) => summary.succeeded.push((path.to_path_buf(), s)),
            Err(e) => {
                error!(file = %path.display(), error = %e, "batch file failed");
                summary.failed.push((path.to_path_buf(), e));
            }
        }
    }

    info!(
        ok = summary.succeeded.len(),
        failed = summary.failed.len(),
        "directory batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::fixture::FakeAnnotator;
    use crate::resolver::RuleResolver;
    use chrono::NaiveDate;
    use serde_json::json;

    fn extractor() -> TaskExtractor<FakeAnnotator, RuleResolver> {
        let reference = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        TaskExtractor::new(FakeAnnotator::default(), RuleResolver::new(reference))
    }

    fn write_input(dir: &Path, name: &str, body: &Value) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(body).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_empty_entry_is_skipped() {
        let entries = vec![json!({"text": "review budget tomorrow"}), json!({"text": ""})];
        let (out, summary) = process_entries(&extractor(), &entries, Shape::Full);
        assert_eq!(summary, BatchSummary { processed: 1, skipped: 1 });
        assert_eq!(out.results.len(), 1);
        assert_eq!(out.results[0].original_text, "review budget tomorrow");
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let entries = vec![
            json!("just a string"),
            json!({"title": "no text"}),
            json!({"text": 42}),
            json!({"text": "   "}),
            json!({"text": "water plants"}),
        ];
        let (out, summary) = process_entries(&extractor(), &entries, Shape::Full);
        assert_eq!(summary, BatchSummary { processed: 1, skipped: 4 });
        assert_eq!(out.results[0].original_text, "water plants");
    }

    #[test]
    fn test_file_round_trip_full_shape() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            "input.json",
            &json!({"tasks": [{"text": "standup on monday at 9am"}, {"text": ""}]}),
        );
        let output = dir.path().join("nested").join("output.json");

        let summary = process_file(&extractor(), &input, &output, Shape::Full).unwrap();
        assert_eq!(summary.processed, 1);

        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let results = written["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        let record = &results[0]["extracted_entities"];
        assert_eq!(record["date"], "2026-10-19");
        assert_eq!(record["time"], "09:00");
        assert!(record["end_time"].is_null());
        assert!(record.get("priority").is_none());
    }

    #[test]
    fn test_legacy_shape_keys() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "in.json", &json!({"tasks": [{"text": "urgent: file taxes"}]}));
        let output = dir.path().join("out.json");

        process_file(&extractor(), &input, &output, Shape::Legacy).unwrap();
        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let record = &written["results"][0]["extracted_entities"];
        assert_eq!(record["priority"], "urgent");
        assert_eq!(record["description"], "urgent: file taxes");
        assert!(record.get("end_time").is_none());
    }

    #[test]
    fn test_missing_and_corrupt_input() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");

        let missing = process_file(&extractor(), &dir.path().join("nope.json"), &out, Shape::Full);
        assert!(matches!(missing, Err(BatchError::NotFound(_))));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        let corrupt = process_file(&extractor(), &bad, &out, Shape::Full);
        assert!(matches!(corrupt, Err(BatchError::Parse { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn test_directory_continues_past_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = dir.path().join("inputs");
        fs::create_dir(&inputs).unwrap();
        write_input(&inputs, "a.json", &json!({"tasks": [{"text": "call mom"}]}));
        fs::write(inputs.join("b.json"), "[broken").unwrap();
        write_input(&inputs, "c.json", &json!({"tasks": [{"text": "pay rent"}, {"text": "buy milk"}]}));
        fs::write(inputs.join("notes.txt"), "ignored").unwrap();
        let outputs = dir.path().join("out");

        let summary = process_dir(&extractor(), &inputs, &outputs, Shape::Full).unwrap();
        assert_eq!(summary.succeeded.len(), 2);
        assert_eq!(summary.failed.len(), 1);
        assert!(summary.failed[0].0.ends_with("b.json"));
        assert_eq!(summary.succeeded[1].1.processed, 2);
        assert!(outputs.join("a.json").is_file());
        assert!(outputs.join("c.json").is_file());
        assert!(!outputs.join("notes.txt").exists());
    }
}
