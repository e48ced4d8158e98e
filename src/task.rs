//! Task phrase selection and cleanup.

use std::collections::HashSet;

use task_types::TASK_PLACEHOLDER;

use crate::annotation::{Doc, Token};

/// Prepositions and linkers that never belong in a task name.
const CONNECTIVES: &[&str] = &[
    "at", "on", "with", "to", "for", "by", "from", "about", "as", "in", "into", "like", "of", "off",
    "onto", "out", "over", "past", "so", "than", "that", "up", "via",
];

fn first_action(doc: &Doc) -> Option<(usize, &Token)> {
    doc.tokens
        .iter()
        .enumerate()
        .find(|(_, t)| t.is_verb() && !t.is_stop)
}

/// `"<lemma> <object>"` for the first non-stop verb, or its lemma alone.
/// Without such a verb the whole trimmed text is the phrase.
pub fn extract_phrase(doc: &Doc) -> String {
    match first_action(doc) {
        Some((i, verb)) => match doc.children(i).find(|c| c.dep.is_task_object()) {
            Some(object) => format!("{} {}", verb.lemma, object.text),
            None => verb.lemma.clone(),
        },
        None => doc.text.trim().to_string(),
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn drop_repeats<'a>(words: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for w in words {
        if out.last().is_some_and(|prev| prev.to_lowercase() == w.to_lowercase()) {
            continue;
        }
        out.push(w);
    }
    out
}

/// Collapse immediate case-insensitive repeats and capitalise.
pub fn simplify(phrase: &str) -> String {
    capitalize_first(&drop_repeats(phrase.split_whitespace()).join(" "))
}

/// Remove words of `excluded` phrases and connectives from `phrase`.
///
/// Returns an empty string if nothing survives.
pub fn strip(phrase: &str, excluded: &[&str]) -> String {
    let banned: HashSet<String> = excluded
        .iter()
        .flat_map(|p| p.split_whitespace())
        .map(str::to_lowercase)
        .chain(CONNECTIVES.iter().map(|w| w.to_string()))
        .collect();

    let kept = phrase
        .split_whitespace()
        .filter(|w| !banned.contains(&w.to_lowercase()));
    capitalize_first(&drop_repeats(kept).join(" "))
}

/// Full cleanup of a raw task phrase against already extracted values.
/// Falls back to the first action verb of `doc`, then to the placeholder.
pub fn clean(phrase: &str, doc: &Doc, excluded: &[&str]) -> String {
    let cleaned = strip(&simplify(phrase), excluded);
    if !cleaned.is_empty() {
        return cleaned;
    }
    match first_action(doc) {
        Some((_, verb)) if !verb.lemma.is_empty() => {
            let lower = verb.lemma.to_lowercase();
            capitalize_first(&lower)
        }
        _ => TASK_PLACEHOLDER.to_string(),
    }
}
