//! Preposition-anchored location detection.

use tracing::debug;

use crate::annotation::{Annotator, Dep, Doc, Pos};

const ANCHORS: &[&str] = &["at", "to", "in"];

/// Phrases opening with these are task verbs, not places.
const ACTION_PREFIXES: &[&str] = &["plan", "schedule", "attend", "visit", "go", "meet", "call", "submit"];

/// Extend `found` (entity-derived locations) with phrases following an
/// anchor preposition, then collapse the result to a containment-free set.
pub fn locate(doc: &Doc, annotator: &impl Annotator, mut found: Vec<String>) -> Vec<String> {
    let tokens = &doc.tokens;

    for (i, tok) in tokens.iter().enumerate() {
        let lower = tok.lower();
        if !ANCHORS.contains(&lower.as_str()) || i + 1 >= tokens.len() {
            continue;
        }
        let next = &tokens[i + 1];
        if next.is_verb() || next.pos == Pos::Punct || next.ent.is_some_and(|k| k.is_temporal()) {
            continue;
        }

        let chunk = doc
            .chunk_starting_at(i + 1)
            .filter(|&c| !tokens[doc.span_root(c)].is_verb());
        let candidate = match chunk {
            Some(c) => doc.span_text(c),
            None if i + 2 < tokens.len()
                && (matches!(next.pos, Pos::Adj | Pos::Propn) || next.dep == Dep::Compound) =>
            {
                format!("{} {}", next.text, tokens[i + 2].text)
            }
            None => next.text.clone(),
        };

        if annotator.annotate(&candidate).tokens.iter().any(|t| t.is_verb()) {
            debug!(%candidate, "location candidate contains a verb");
            continue;
        }
        if found.iter().any(|l| l.contains(&candidate) || candidate.contains(l.as_str())) {
            continue;
        }
        debug!(%candidate, anchor = %lower, "location from preposition");
        found.push(candidate);
    }

    collapse(found)
}

/// Keep first-seen entries that neither contain nor are contained in an
/// earlier one, and drop those opening with an action verb.
pub fn collapse(locations: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(locations.len());
    for loc in locations {
        if kept.iter().any(|k| k.contains(&loc) || loc.contains(k.as_str())) {
            continue;
        }
        kept.push(loc);
    }
    kept.retain(|loc| {
        let lower = loc.to_lowercase();
        !ACTION_PREFIXES.iter().any(|verb| lower.starts_with(verb))
    });
    kept
}
