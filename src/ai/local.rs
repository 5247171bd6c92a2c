//! Local keyword rules for the canned university answers.

use super::responses::{ResponseTable, Topic};
use super::Responder;

/// One keyword rule: any keyword contained in the input selects `topic`.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub topic: Topic,
    pub keywords: &'static [&'static str],
}

impl Rule {
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k))
    }
}

/// Rules in priority order; the first match wins. Matching is plain
/// substring containment, so "this" selects the greeting.
pub const RULES: &[Rule] = &[
    Rule { topic: Topic::Hello, keywords: &["hello", "hi"] },
    Rule { topic: Topic::Help, keywords: &["help"] },
    Rule { topic: Topic::Faculty, keywords: &["faculty", "professor", "teacher"] },
    Rule { topic: Topic::Admission, keywords: &["admission", "apply"] },
    Rule { topic: Topic::Departments, keywords: &["department", "dept"] },
    Rule { topic: Topic::Notifications, keywords: &["notification", "news", "announcement"] },
    Rule { topic: Topic::FacultyLookup, keywords: &["dr.", "prof"] },
];

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Topic of the first rule matching `raw`, or [`Topic::Default`].
pub fn topic_for(raw: &str) -> Topic {
    let normalized = normalize(raw);
    RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map(|rule| rule.topic)
        .unwrap_or(Topic::Default)
}

/// Stateless responder over a fixed [`ResponseTable`].
#[derive(Debug, Clone, Default)]
pub struct KeywordResponder {
    table: ResponseTable,
}

impl KeywordResponder {
    pub fn new(table: ResponseTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    pub fn classify(&self, raw: &str) -> &str {
        let topic = topic_for(raw);
        log::debug!("matched topic {}", topic);
        self.table.get(topic)
    }
}

impl Responder for KeywordResponder {
    fn name(&self) -> &str {
        "keyword rules"
    }

    fn respond(&self, text: &str) -> String {
        self.classify(text).to_string()
    }
}
