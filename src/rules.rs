//! Lexicon-and-pattern English annotator.
//!
//! Produces the same shape of output a statistical pipeline would (tokens,
//! lemmas, coarse tags, shallow dependency edges, noun chunks, entities)
//! from closed word lists and regexes. It holds nothing but compiled
//! patterns, so one instance serves every caller concurrently.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::annotation::{Annotator, Dep, Doc, Pos, Span, Token};
use crate::lexicon::{
    verb_lemma, noun_lemma, ADJECTIVES, ADVERBS, AUXILIARIES, COORDINATORS, COPULAS,
    DETERMINERS, FACILITY_SUFFIXES, GIVEN_NAMES, HONORIFICS, MONTHS, PLACES, PREPOSITIONS,
    PRONOUNS, STOP_WORDS, SUBORDINATORS, WEEKDAYS,
};

// ── Process-wide instance ────────────────────────────────────────────────

static SHARED: LazyLock<RuleAnnotator> = LazyLock::new(|| {
    debug!("initialising rule annotator");
    RuleAnnotator::new()
});

/// The shared annotator, built on first use and kept for the process
/// lifetime.
pub fn shared() -> &'static RuleAnnotator {
    &SHARED
}

// ── Patterns ─────────────────────────────────────────────────────────────

static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[ap]\.m\.|[a-z]+(?:['-][a-z]+)*|\d+(?:[:.]\d+)?|\S").unwrap()
});

const TIME_PATTERNS: &[&str] = &[
    r"(?i)\b\d{1,2}(?:[:.]\d{2})?\s*(?:[ap]\.m\.|[ap]m\b)",
    r"(?i)\b\d{1,2}:\d{2}\b(?:\s*hrs\b)?",
    r"(?i)\b\d{1,4}\s*hrs\b",
    r"(?i)\b(?:noon|midday|midnight|tonight)\b",
    r"(?i)\b(?:this\s+)?(?:morning|afternoon|evening)\b",
    r"(?i)\b(?:half\s+an|an?|one|two|three|\d+(?:\.\d+)?)\s+(?:hours?|hrs?|minutes?|mins?)\b",
];

const DATE_PATTERNS: &[&str] = &[
    r"(?i)\b(?:the\s+)?day\s+after\s+tomorrow\b",
    r"(?i)\b(?:today|tomorrow|yesterday)\b",
    r"(?i)\b(?:(?:next|this|last|coming)\s+)?(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    r"(?i)\b(?:next|this|last)\s+(?:week|month|year)\b",
    r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|march|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2}(?:st|nd|rd|th)?(?:,?\s*\d{4})?\b",
    r"(?i)\b\d{1,2}(?:st|nd|rd|th)?\s+of\s+(?:january|february|march|april|may|june|july|august|september|october|november|december)\b",
    r"\b\d{4}-\d{1,2}-\d{1,2}\b",
    r"\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b",
    r"(?i)\bin\s+(?:\d+|an?|one|two|three)\s+(?:days?|weeks?|months?)\b",
];

/// A token before tagging.
#[derive(Debug)]
struct Word {
    text: String,
    lower: String,
    idx: usize,
}

impl Word {
    fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(|c| c.is_uppercase())
    }

    fn end(&self) -> usize {
        self.idx + self.text.len()
    }
}

// ── Annotator ────────────────────────────────────────────────────────────

pub struct RuleAnnotator {
    time_patterns: Vec<Regex>,
    date_patterns: Vec<Regex>,
    /// Multi-word place names split into words, longest first
    places: Vec<Vec<&'static str>>,
}

impl Default for RuleAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleAnnotator {
    pub fn new() -> Self {
        let compile = |patterns: &[&str]| -> Vec<Regex> {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("temporal entity regex"))
                .collect()
        };

        let mut places: Vec<Vec<&'static str>> = PLACES
            .iter()
            .map(|p| p.split_whitespace().collect())
            .collect();
        places.sort_by_key(|p| std::cmp::Reverse(p.len()));

        RuleAnnotator {
            time_patterns: compile(TIME_PATTERNS),
            date_patterns: compile(DATE_PATTERNS),
            places,
        }
    }

    fn tokenize(text: &str) -> Vec<Word> {
        RE_TOKEN
            .find_iter(text)
            .map(|m| Word {
                text: m.as_str().to_string(),
                lower: m.as_str().to_lowercase(),
                idx: m.start(),
            })
            .collect()
    }

    /// DATE/TIME spans from the regex families, longest-leftmost, no overlaps.
    fn temporal_entities(&self, text: &str, words: &[Word]) -> Vec<(&'static str, Span)> {
        let mut hits: Vec<(usize, usize, &'static str)> = Vec::new();
        for (label, patterns) in [("TIME", &self.time_patterns), ("DATE", &self.date_patterns)] {
            for re in patterns {
                hits.extend(re.find_iter(text).map(|m| (m.start(), m.end(), label)));
            }
        }
        hits.sort_by_key(|&(start, end, _)| (start, std::cmp::Reverse(end)));

        let mut out = Vec::new();
        let mut last_end = 0;
        for (start, end, label) in hits {
            if start < last_end {
                continue;
            }
            let first = words.iter().position(|w| w.idx >= start);
            let past = words.iter().position(|w| w.end() > end).unwrap_or(words.len());
            if let Some(first) = first
                && first < past
            {
                out.push((label, Span { start: first, end: past }));
                last_end = end;
            }
        }
        out
    }

    /// PERSON / GPE / FAC / ORG spans over tokens not already claimed.
    fn name_entities(&self, words: &[Word], taken: &mut [bool]) -> Vec<(&'static str, Span)> {
        let mut out = Vec::new();
        let n = words.len();
        let sentence_start = |i: usize| i == 0 || matches!(words[i - 1].text.as_str(), "." | "!" | "?");
        let free_cap = |i: usize, taken: &[bool]| i < n && !taken[i] && words[i].is_capitalized();
        // Capitalised continuation words that are not function words.
        let name_part = |i: usize, taken: &[bool]| {
            free_cap(i, taken) && !is_closed_class(&words[i].lower) && verb_lemma(&words[i].lower).is_none()
        };

        let mut i = 0;
        while i < n {
            let claimed: &[bool] = taken;
            if !free_cap(i, claimed) {
                i += 1;
                continue;
            }

            let found = if let Some(len) = self.place_at(words, i, claimed) {
                Some(("GPE", i + len))
            } else if HONORIFICS.contains(&words[i].lower.as_str()) {
                let mut j = i + 1;
                if j < n && words[j].text == "." {
                    j += 1;
                }
                let body = j;
                while name_part(j, claimed) {
                    j += 1;
                }
                (j > body).then_some(("PERSON", j))
            } else if GIVEN_NAMES.contains(&words[i].lower.as_str()) {
                let mut j = i + 1;
                while name_part(j, claimed) && self.place_at(words, j, claimed).is_none() {
                    j += 1;
                }
                Some(("PERSON", j))
            } else {
                let mut j = i;
                while name_part(j, claimed) || (j == i && free_cap(j, claimed)) {
                    j += 1;
                }
                let tail = words[j - 1].lower.as_str();
                let facility = FACILITY_SUFFIXES
                    .iter()
                    .find(|(suffix, _)| *suffix == tail)
                    .map(|(_, label)| *label);
                let after_anchor = i > 0 && matches!(words[i - 1].lower.as_str(), "at" | "in");
                match facility {
                    Some(label) if j - i > 1 => Some((label, j)),
                    _ if after_anchor && !sentence_start(i) && !is_closed_class(&words[i].lower) => {
                        Some((if words[i - 1].lower == "at" { "FAC" } else { "GPE" }, j))
                    }
                    _ => None,
                }
            };

            match found {
                Some((label, end)) if end > i => {
                    taken[i..end].iter_mut().for_each(|t| *t = true);
                    out.push((label, Span { start: i, end }));
                    i = end;
                }
                _ => i += 1,
            }
        }
        out
    }

    /// Length of the longest gazetteer place starting at `i`.
    fn place_at(&self, words: &[Word], i: usize, taken: &[bool]) -> Option<usize> {
        self.places.iter().find_map(|parts| {
            let len = parts.len();
            let end = i + len;
            let fits = end <= words.len()
                && !taken[i..end].iter().any(|t| *t)
                && words[i..end].iter().zip(parts).all(|(w, p)| w.lower == *p);
            fits.then_some(len)
        })
    }

    fn tag(words: &[Word], labels: &[Option<&str>]) -> Vec<Pos> {
        let mut tags: Vec<Pos> = Vec::with_capacity(words.len());
        for (i, w) in words.iter().enumerate() {
            let lower = w.lower.as_str();
            let prev = i.checked_sub(1).map(|p| tags[p]);
            let sentence_start = i == 0 || matches!(words[i - 1].text.as_str(), "." | "!" | "?");
            let label = labels[i];

            let pos = if !w.text.chars().next().is_some_and(char::is_alphanumeric) {
                Pos::Punct
            } else if w.text.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '.') {
                Pos::Num
            } else if matches!(label, Some("PERSON" | "GPE" | "FAC" | "ORG")) {
                Pos::Propn
            } else if WEEKDAYS.contains(&lower) || (label == Some("DATE") && MONTHS.contains(&lower)) {
                Pos::Propn
            } else if lower == "to" {
                let next_is_verb = words
                    .get(i + 1)
                    .is_some_and(|n| labels[i + 1].is_none() && verb_lemma(&n.lower).is_some());
                if next_is_verb { Pos::Part } else { Pos::Adp }
            } else if DETERMINERS.contains(&lower) {
                Pos::Det
            } else if PREPOSITIONS.contains(&lower) {
                Pos::Adp
            } else if PRONOUNS.contains(&lower) {
                Pos::Pron
            } else if COORDINATORS.contains(&lower) {
                Pos::Cconj
            } else if SUBORDINATORS.contains(&lower) {
                Pos::Sconj
            } else if AUXILIARIES.contains(&lower) {
                Pos::Aux
            } else if ADVERBS.contains(&lower) {
                Pos::Adv
            } else if ADJECTIVES.contains(&lower) {
                Pos::Adj
            } else if lower == "please" {
                Pos::Intj
            } else if verb_lemma(lower).is_some()
                && !matches!(prev, Some(Pos::Det | Pos::Adj | Pos::Num | Pos::Adp))
            {
                Pos::Verb
            } else if w.is_capitalized() && !sentence_start {
                Pos::Propn
            } else if lower.len() > 4 && lower.ends_with("ly") {
                Pos::Adv
            } else {
                Pos::Noun
            };
            tags.push(pos);
        }
        tags
    }

    fn lemma(word: &Word, pos: Pos) -> String {
        let lower = word.lower.as_str();
        match pos {
            Pos::Verb => verb_lemma(lower).unwrap_or_else(|| lower.to_string()),
            Pos::Aux if COPULAS.contains(&lower) => "be".to_string(),
            Pos::Aux if matches!(lower, "has" | "had") => "have".to_string(),
            Pos::Aux if matches!(lower, "does" | "did") => "do".to_string(),
            Pos::Noun => noun_lemma(lower),
            Pos::Propn => word.text.clone(),
            _ => lower.to_string(),
        }
    }

    fn chunks(tags: &[Pos], labels: &[Option<&str>]) -> Vec<Span> {
        let member = |p: Pos| matches!(p, Pos::Det | Pos::Adj | Pos::Num | Pos::Noun | Pos::Propn | Pos::Pron);
        let n = tags.len();
        let mut out = Vec::new();
        let mut i = 0;
        while i < n {
            if !member(tags[i]) {
                i += 1;
                continue;
            }
            let start = i;
            let mut j = i + 1;
            while j < n && member(tags[j]) {
                let joins_entity = j - 1 == start && tags[start] == Pos::Det;
                let pron_edge = tags[j] == Pos::Pron || tags[j - 1] == Pos::Pron;
                if pron_edge || (labels[j] != labels[j - 1] && !joins_entity) {
                    break;
                }
                j += 1;
            }
            let mut end = j;
            while end > start && !tags[end - 1].is_nominal() {
                end -= 1;
            }
            if end > start {
                out.push(Span { start, end });
            }
            i = j;
        }
        out
    }

    fn parse(words: &[Word], tags: &[Pos], chunks: &[Span]) -> (Vec<usize>, Vec<Dep>) {
        let n = tags.len();
        let root = (0..n)
            .find(|&i| tags[i] == Pos::Verb)
            .or_else(|| (0..n).find(|&i| tags[i] == Pos::Aux))
            .or_else(|| (0..n).find(|&i| tags[i].is_nominal()))
            .unwrap_or(0);
        let mut heads = vec![root; n];
        let mut deps = vec![Dep::Other; n];
        let mut in_chunk = vec![false; n];

        for chunk in chunks {
            let r = chunk.end - 1;
            in_chunk[chunk.start..chunk.end].iter_mut().for_each(|c| *c = true);
            for k in chunk.start..r {
                heads[k] = r;
                deps[k] = match tags[k] {
                    Pos::Det => Dep::Det,
                    Pos::Adj => Dep::Amod,
                    _ => Dep::Compound,
                };
            }
            if r == root {
                continue;
            }
            let (head, dep) = match chunk.start.checked_sub(1) {
                Some(b) if tags[b] == Pos::Adp => (b, Dep::Pobj),
                Some(b) => {
                    let mut v = b;
                    while v > 0 && matches!(tags[v], Pos::Adv | Pos::Intj) {
                        v -= 1;
                    }
                    if tags[v] == Pos::Verb {
                        (v, Dep::Dobj)
                    } else if tags[v] == Pos::Aux && COPULAS.contains(&words[v].lower.as_str()) {
                        (v, Dep::Attr)
                    } else if r < root {
                        (root, Dep::Nsubj)
                    } else {
                        (root, Dep::Other)
                    }
                }
                None if r < root => (root, Dep::Nsubj),
                None => (root, Dep::Other),
            };
            heads[r] = head;
            deps[r] = dep;
        }

        for i in 0..n {
            if i == root || in_chunk[i] {
                continue;
            }
            match tags[i] {
                Pos::Adp => {
                    deps[i] = Dep::Prep;
                    heads[i] = (0..i)
                        .rev()
                        .find(|&j| tags[j] == Pos::Verb)
                        .or_else(|| (0..i).rev().find(|&j| tags[j].is_nominal()))
                        .unwrap_or(root);
                }
                Pos::Part if tags.get(i + 1) == Some(&Pos::Verb) => {
                    deps[i] = Dep::Aux;
                    heads[i] = i + 1;
                }
                Pos::Aux => deps[i] = Dep::Aux,
                _ => {}
            }
        }
        deps[root] = Dep::Root;
        heads[root] = root;
        (heads, deps)
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> Doc {
        let words = Self::tokenize(text);
        if words.is_empty() {
            return Doc::new(text, Vec::new(), Vec::new(), Vec::new());
        }

        let mut entities = self.temporal_entities(text, &words);
        let mut taken = vec![false; words.len()];
        for (_, span) in &entities {
            taken[span.start..span.end].iter_mut().for_each(|t| *t = true);
        }
        entities.extend(self.name_entities(&words, &mut taken));
        entities.sort_by_key(|(_, span)| span.start);

        let mut labels: Vec<Option<&str>> = vec![None; words.len()];
        for (label, span) in &entities {
            labels[span.start..span.end].iter_mut().for_each(|l| *l = Some(*label));
        }

        let tags = Self::tag(&words, &labels);
        let chunks = Self::chunks(&tags, &labels);
        let (heads, deps) = Self::parse(&words, &tags, &chunks);

        let tokens = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token {
                text: w.text.clone(),
                idx: w.idx,
                lemma: Self::lemma(w, tags[i]),
                pos: tags[i],
                dep: deps[i],
                head: heads[i],
                ent: None,
                is_stop: is_stop_word(&w.lower),
            })
            .collect();

        let spans = entities
            .into_iter()
            .map(|(label, span)| (label.to_string(), span))
            .collect();
        Doc::new(text, tokens, chunks, spans)
    }
}

fn is_closed_class(lower: &str) -> bool {
    [DETERMINERS, PREPOSITIONS, PRONOUNS, COORDINATORS, SUBORDINATORS, AUXILIARIES]
        .iter()
        .any(|list| list.contains(&lower))
        || WEEKDAYS.contains(&lower)
        || MONTHS.contains(&lower)
}

fn is_stop_word(lower: &str) -> bool {
    STOP_WORDS.contains(&lower)
        || [DETERMINERS, PREPOSITIONS, PRONOUNS, COORDINATORS, SUBORDINATORS, AUXILIARIES]
            .iter()
            .any(|list| list.contains(&lower))
}
