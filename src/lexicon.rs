//! Closed word lists backing the rule-based annotator.
//!
//! Everything here is lowercase; callers lowercase before lookup.

pub const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "every", "each", "all", "no", "another", "both", "either", "neither",
];

pub const PREPOSITIONS: &[&str] = &[
    "at", "to", "in", "on", "with", "for", "by", "from", "about", "as", "into", "like", "of",
    "off", "onto", "over", "past", "via", "after", "before", "during", "until", "till", "til",
    "through", "between", "near", "around", "under", "above", "across", "without", "within",
    "behind", "regarding", "per", "since", "toward", "towards", "upon", "inside", "outside",
];

pub const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself", "yourself",
    "himself", "herself", "ourselves", "themselves", "everyone", "someone", "somebody",
    "everybody", "anyone", "something", "anything", "nothing", "everything", "mine", "yours",
];

pub const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "&"];

pub const SUBORDINATORS: &[&str] = &["if", "because", "while", "when", "whether", "unless", "once"];

pub const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "'ll",
];

pub const ADVERBS: &[&str] = &[
    "also", "then", "soon", "later", "now", "asap", "again", "really", "very", "just", "still",
    "already", "together", "there", "here", "not", "n't", "too", "early", "back", "away",
];

pub const ADJECTIVES: &[&str] = &[
    "urgent", "important", "quick", "new", "weekly", "daily", "monthly", "annual", "quarterly",
    "final", "next", "last", "short", "long", "big", "small", "main", "late", "high-priority",
    "low-priority", "good", "first", "second", "third", "local", "regular", "brief", "formal",
    "informal", "critical", "optional", "upcoming", "initial", "follow-up", "remote", "virtual",
    "whole", "entire", "other", "same", "usual", "special",
];

/// Base forms treated as verbs.
pub const VERBS: &[&str] = &[
    "call", "meet", "schedule", "discuss", "send", "email", "review", "submit", "attend", "visit",
    "go", "plan", "finish", "write", "prepare", "buy", "pick", "book", "pay", "remind", "ask",
    "tell", "check", "update", "fix", "clean", "organize", "arrange", "present", "talk", "sync",
    "follow", "reply", "respond", "confirm", "cancel", "reschedule", "join", "host", "bring",
    "deliver", "drop", "grab", "get", "make", "take", "give", "see", "read", "watch", "study",
    "practice", "complete", "start", "begin", "end", "finalize", "draft", "share", "order",
    "collect", "return", "renew", "file", "sign", "print", "run", "walk", "drive", "fly",
    "travel", "work", "help", "teach", "learn", "contact", "text", "message", "ping", "interview",
    "celebrate", "cook", "wash", "water", "feed", "move", "install", "test", "deploy", "demo",
    "dine", "eat", "hold", "leave", "find", "speak", "think", "keep", "set", "put", "say",
    "need", "want", "try", "catch", "record", "publish", "edit",
    "design", "build", "launch", "pitch", "negotiate", "approve", "register", "apply", "hire",
    "train", "exercise", "swim", "shop", "wrap", "pack", "ship", "mail", "post", "invite",
    "notify", "inform", "coordinate", "onboard", "outline", "summarize", "analyze", "research",
];

/// Irregular inflections → base form.
pub const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("went", "go"), ("gone", "go"), ("goes", "go"), ("met", "meet"), ("sent", "send"),
    ("wrote", "write"), ("written", "write"), ("bought", "buy"), ("paid", "pay"),
    ("told", "tell"), ("took", "take"), ("taken", "take"), ("gave", "give"), ("given", "give"),
    ("saw", "see"), ("seen", "see"), ("made", "make"), ("got", "get"), ("gotten", "get"),
    ("brought", "bring"), ("began", "begin"), ("begun", "begin"), ("ran", "run"),
    ("drove", "drive"), ("driven", "drive"), ("flew", "fly"), ("flown", "fly"), ("ate", "eat"),
    ("eaten", "eat"), ("taught", "teach"), ("held", "hold"), ("left", "leave"),
    ("found", "find"), ("spoke", "speak"), ("spoken", "speak"), ("thought", "think"),
    ("kept", "keep"), ("caught", "catch"), ("swam", "swim"), ("built", "build"),
];

/// Forms of "be" that can introduce an attribute.
pub const COPULAS: &[&str] = &["be", "am", "is", "are", "was", "were", "been", "being"];

pub const STOP_WORDS: &[&str] = &[
    // light verbs
    "do", "does", "did", "make", "made", "get", "got", "take", "took", "give", "gave", "put",
    "see", "say", "said", "become", "seem", "please", "can", "will",
    // function words not already covered by the closed classes above
    "so", "than", "up", "out", "down", "there", "here", "not", "no", "very", "just", "also",
    "then", "too", "again", "only", "own", "such", "what", "which", "who", "whom", "whose",
    "how", "why", "where",
];

/// Honorifics that introduce a person name.
pub const HONORIFICS: &[&str] = &["mr", "mrs", "ms", "miss", "dr", "prof", "sir", "madam"];

/// Common English given names, used to anchor PERSON spans.
pub const GIVEN_NAMES: &[&str] = &[
    "james", "john", "robert", "michael", "william", "david", "richard", "joseph", "thomas",
    "charles", "christopher", "daniel", "matthew", "anthony", "mark", "donald", "steven", "paul",
    "andrew", "joshua", "kenneth", "kevin", "brian", "george", "timothy", "ronald", "edward",
    "jason", "jeffrey", "ryan", "jacob", "gary", "nicholas", "eric", "jonathan", "stephen",
    "larry", "justin", "scott", "brandon", "benjamin", "samuel", "frank", "gregory", "raymond",
    "alexander", "patrick", "jack", "dennis", "jerry", "tyler", "aaron", "adam", "henry",
    "nathan", "peter", "zachary", "kyle", "noah", "ethan", "jeremy", "walter", "christian",
    "keith", "roger", "terry", "sean", "austin", "carl", "arthur", "lawrence", "dylan", "jesse",
    "jordan", "bryan", "billy", "joe", "bruce", "gabriel", "logan", "albert", "willie", "alan",
    "juan", "wayne", "elijah", "randy", "roy", "vincent", "ralph", "eugene", "russell", "bobby",
    "mason", "philip", "louis", "tom", "tim", "bob", "mike", "dave", "dan", "sam", "ben", "max",
    "alex", "chris", "nick", "tony", "jim", "bill", "rahul", "raj", "arjun", "wei", "omar",
    "mary", "patricia", "jennifer", "linda", "elizabeth", "barbara", "susan", "jessica", "sarah",
    "karen", "lisa", "nancy", "betty", "margaret", "sandra", "ashley", "kimberly", "emily",
    "donna", "michelle", "carol", "amanda", "dorothy", "melissa", "deborah", "stephanie",
    "rebecca", "sharon", "laura", "cynthia", "kathleen", "amy", "angela", "shirley", "anna",
    "brenda", "pamela", "emma", "nicole", "helen", "samantha", "katherine", "christine",
    "debra", "rachel", "carolyn", "janet", "catherine", "maria", "heather", "diane", "ruth",
    "julie", "olivia", "joyce", "virginia", "victoria", "kelly", "lauren", "christina", "joan",
    "evelyn", "judith", "megan", "andrea", "cheryl", "hannah", "jacqueline", "martha", "gloria",
    "teresa", "ann", "sara", "madison", "frances", "kathryn", "janice", "jean", "abigail",
    "alice", "julia", "judy", "sophia", "grace", "denise", "amber", "doris", "marilyn",
    "danielle", "beverly", "isabella", "theresa", "diana", "natalie", "brittany", "charlotte",
    "marie", "kayla", "alexis", "lori", "kate", "jane", "liz", "jen", "priya", "ananya", "mei",
    "fatima", "aisha", "lucy", "chloe", "zoe", "mia", "ella", "ava",
];

/// Place names recognised as geopolitical entities. Multi-word entries are
/// matched token by token.
pub const PLACES: &[&str] = &[
    "new york", "new york city", "los angeles", "san francisco", "san diego", "san jose",
    "las vegas", "new jersey", "new delhi", "hong kong", "buenos aires", "rio de janeiro",
    "mexico city", "washington", "chicago", "boston", "seattle", "austin", "denver", "miami",
    "atlanta", "dallas", "houston", "phoenix", "portland", "detroit", "philadelphia",
    "london", "paris", "berlin", "madrid", "rome", "milan", "amsterdam", "dublin", "lisbon",
    "vienna", "prague", "zurich", "geneva", "brussels", "stockholm", "oslo", "copenhagen",
    "helsinki", "warsaw", "moscow", "istanbul", "dubai", "cairo", "nairobi", "lagos", "mumbai",
    "delhi", "bangalore", "chennai", "singapore", "tokyo", "osaka", "seoul", "beijing",
    "shanghai", "sydney", "melbourne", "toronto", "vancouver", "montreal", "ottawa",
    "california", "texas", "florida", "canada", "mexico", "brazil", "france", "germany",
    "italy", "spain", "japan", "china", "india", "england", "scotland", "ireland", "australia",
    "europe", "asia", "africa", "america",
];

/// Trailing words that mark a capitalised run as a facility or organisation.
pub const FACILITY_SUFFIXES: &[(&str, &str)] = &[
    ("inc", "ORG"), ("corp", "ORG"), ("llc", "ORG"), ("ltd", "ORG"), ("company", "ORG"),
    ("university", "ORG"), ("college", "ORG"), ("bank", "ORG"), ("institute", "ORG"),
    ("hospital", "FAC"), ("center", "FAC"), ("centre", "FAC"), ("library", "FAC"),
    ("airport", "FAC"), ("station", "FAC"), ("hotel", "FAC"), ("cafe", "FAC"),
    ("museum", "FAC"), ("park", "FAC"), ("hall", "FAC"), ("building", "FAC"), ("street", "FAC"),
    ("avenue", "FAC"), ("road", "FAC"), ("square", "FAC"), ("mall", "FAC"), ("stadium", "FAC"),
];

pub const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

pub const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Base form of a verb token, if the word is a known verb in any inflection.
pub fn verb_lemma(lower: &str) -> Option<String> {
    if VERBS.contains(&lower) {
        return Some(lower.to_string());
    }
    if let Some((_, base)) = IRREGULAR_VERBS.iter().find(|(form, _)| *form == lower) {
        return Some(base.to_string());
    }

    // Regular inflections: -ing, -ed, -es, -s, with doubled-consonant and
    // dropped-e variants.
    let candidates = |stem: &str| -> Vec<String> {
        let mut out = vec![stem.to_string(), format!("{stem}e")];
        let bytes = stem.as_bytes();
        if bytes.len() >= 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
            out.push(stem[..stem.len() - 1].to_string());
        }
        if let Some(s) = stem.strip_suffix('i') {
            out.push(format!("{s}y"));
        }
        out
    };

    for suffix in ["ing", "ed", "es", "s"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() < 2 {
                continue;
            }
            if let Some(base) = candidates(stem).into_iter().find(|c| VERBS.contains(&c.as_str())) {
                return Some(base);
            }
        }
    }
    None
}

/// Singular form of a regular plural noun.
pub fn noun_lemma(lower: &str) -> String {
    if lower.len() > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        if let Some(stem) = lower.strip_suffix("ies") {
            return format!("{stem}y");
        }
        return lower[..lower.len() - 1].to_string();
    }
    lower.to_string()
}
