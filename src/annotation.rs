//! Annotation model consumed by the extraction stages.
//!
//! An [`Annotator`] turns raw text into a [`Doc`]: tokens with lemma,
//! coarse part-of-speech, dependency edge and entity kind, plus noun-phrase
//! chunks and labelled entity spans. The extraction core only reads these
//! structures; it never tags anything itself.
//!
//! Implementations must be reentrant: `annotate` takes `&self`, and the
//! shared instance is called from any thread without locking.

// ── Coarse part-of-speech ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Verb,
    Aux,
    Noun,
    Propn,
    Adj,
    Adp,
    Det,
    Pron,
    Num,
    Adv,
    Part,
    Cconj,
    Sconj,
    Punct,
    Intj,
}

impl Pos {
    /// Tags that can sit inside a noun-phrase chunk.
    pub fn is_nominal(self) -> bool {
        matches!(self, Self::Noun | Self::Propn | Self::Pron)
    }
}

// ── Dependency relation ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dep {
    Root,
    /// Direct object
    Dobj,
    /// Attribute of a copula
    Attr,
    /// Prepositional modifier
    Prep,
    /// Object of a preposition
    Pobj,
    Compound,
    Amod,
    Det,
    Nsubj,
    Aux,
    Other,
}

impl Dep {
    /// Relations that name what a verb acts on.
    pub fn is_task_object(self) -> bool {
        matches!(self, Self::Dobj | Self::Attr | Self::Prep)
    }
}

// ── Entity kind ──────────────────────────────────────────────────────────

/// The closed set of entity classes the extractor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Date,
    Time,
    /// Facility, geopolitical entity, general location or organization.
    Location,
    Other,
}

/// Raw NER label → variant. Unlisted labels map to [`EntityKind::Other`].
const ENTITY_LABELS: &[(&str, EntityKind)] = &[
    ("PERSON", EntityKind::Person),
    ("DATE", EntityKind::Date),
    ("TIME", EntityKind::Time),
    ("FAC", EntityKind::Location),
    ("GPE", EntityKind::Location),
    ("LOC", EntityKind::Location),
    ("ORG", EntityKind::Location),
];

impl EntityKind {
    pub fn from_label(label: &str) -> Self {
        ENTITY_LABELS
            .iter()
            .find(|(raw, _)| *raw == label)
            .map(|(_, kind)| *kind)
            .unwrap_or(Self::Other)
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Time)
    }
}

// ── Tokens, spans, entities ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    /// Byte offset of the token in the source text
    pub idx: usize,
    pub lemma: String,
    pub pos: Pos,
    pub dep: Dep,
    /// Index of the governing token; the root points at itself
    pub head: usize,
    /// Kind of the entity this token belongs to, if any
    pub ent: Option<EntityKind>,
    pub is_stop: bool,
}

impl Token {
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_verb(&self) -> bool {
        self.pos == Pos::Verb
    }
}

/// Half-open token range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    /// The label as the annotator produced it
    pub label: String,
    pub span: Span,
    pub text: String,
}

// ── Annotated document ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doc {
    pub text: String,
    pub tokens: Vec<Token>,
    pub noun_chunks: Vec<Span>,
    pub entities: Vec<Entity>,
}

impl Doc {
    /// Assemble a document, stamping each token with its entity kind and
    /// filling in entity text from the source.
    pub fn new(
        text: &str,
        mut tokens: Vec<Token>,
        noun_chunks: Vec<Span>,
        entity_spans: Vec<(String, Span)>,
    ) -> Self {
        let mut entities = Vec::with_capacity(entity_spans.len());
        for (label, span) in entity_spans {
            if span.start >= span.end || span.end > tokens.len() {
                continue;
            }
            let kind = EntityKind::from_label(&label);
            for tok in &mut tokens[span.start..span.end] {
                tok.ent = Some(kind);
            }
            entities.push(Entity {
                kind,
                label,
                span,
                text: span_text(text, &tokens, span),
            });
        }

        Doc {
            text: text.to_string(),
            tokens,
            noun_chunks,
            entities,
        }
    }

    /// Tokens governed by `i`, in text order.
    pub fn children(&self, i: usize) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(j, t)| *j != i && t.head == i)
            .map(|(_, t)| t)
    }

    /// Source text covered by a span, original spacing preserved.
    pub fn span_text(&self, span: Span) -> String {
        span_text(&self.text, &self.tokens, span)
    }

    /// The chunk that begins exactly at token `i`.
    pub fn chunk_starting_at(&self, i: usize) -> Option<Span> {
        self.noun_chunks.iter().copied().find(|c| c.start == i)
    }

    /// The token of `span` whose head lies outside it; the last token if
    /// every head is internal.
    pub fn span_root(&self, span: Span) -> usize {
        (span.start..span.end)
            .find(|&i| {
                let head = self.tokens[i].head;
                head == i || head < span.start || head >= span.end
            })
            .unwrap_or(span.end.saturating_sub(1))
    }
}

fn span_text(text: &str, tokens: &[Token], span: Span) -> String {
    if span.start >= span.end || span.end > tokens.len() {
        return String::new();
    }
    let first = &tokens[span.start];
    let last = &tokens[span.end - 1];
    let end = last.idx + last.text.len();
    text.get(first.idx..end)
        .map(str::to_string)
        .unwrap_or_else(|| {
            tokens[span.start..span.end]
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
}

// ── The pipeline seam ────────────────────────────────────────────────────

/// Produces token- and span-level annotations for a piece of text.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Doc;
}

impl<T: Annotator + ?Sized> Annotator for &T {
    fn annotate(&self, text: &str) -> Doc {
        (**self).annotate(text)
    }
}

// ── Hand-built documents for tests ───────────────────────────────────────
