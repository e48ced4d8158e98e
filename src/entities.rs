//! Partition annotated entities into record fields.

use chrono::{NaiveDate, NaiveTime};

use crate::annotation::{Doc, EntityKind};
use crate::resolver::DateTimeResolver;

/// A resolved value plus the source text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Found<T> {
    pub value: T,
    pub source: String,
}

/// Fields derived from named entities alone.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Collected {
    pub participants: Vec<String>,
    pub date: Option<Found<NaiveDate>>,
    pub time: Option<Found<NaiveTime>>,
    pub locations: Vec<String>,
}

/// Walk the entities in order. People and places are appended as written;
/// the first DATE and TIME entity the resolver accepts fills its field and
/// unresolvable ones are skipped.
///
/// A later temporal entity never overwrites an earlier resolved one, so in
/// "from 2pm to 4pm" the start of the range is the time.
pub fn collect(doc: &Doc, resolver: &impl DateTimeResolver) -> Collected {
    let mut out = Collected::default();

    for ent in &doc.entities {
        match ent.kind {
            EntityKind::Person => out.participants.push(ent.text.clone()),
            EntityKind::Location => out.locations.push(ent.text.clone()),
            EntityKind::Date if out.date.is_none() => {
                out.date = resolver.resolve_date(&ent.text).map(|value| Found {
                    value,
                    source: ent.text.clone(),
                });
            }
            EntityKind::Time if out.time.is_none() => {
                out.time = resolver.resolve_time(&ent.text).map(|value| Found {
                    value,
                    source: ent.text.clone(),
                });
            }
            EntityKind::Date | EntityKind::Time | EntityKind::Other => {}
        }
    }

    out
}
