use std::collections::HashMap;

use super::domain::TranscriptSubject;

/// Shorter fragments are only accepted on an exact token match.
const MIN_CONTAINED_LEN: usize = 3;

/// Transcript subjects indexed for requirement lookups.
///
/// Exact (case-insensitive, trimmed) names resolve through the map. Anything
/// else falls back to a token scan in transcript order, so the first fuzzy hit
/// wins rather than the closest one.
pub(crate) struct SubjectLookup<'a> {
    exact: HashMap<String, usize>,
    entries: Vec<SubjectEntry<'a>>,
}

struct SubjectEntry<'a> {
    tokens: Vec<String>,
    subject: &'a TranscriptSubject,
}

impl<'a> SubjectLookup<'a> {
    pub(crate) fn new(subjects: &'a [TranscriptSubject]) -> Self {
        let mut exact = HashMap::with_capacity(subjects.len());
        let mut entries = Vec::with_capacity(subjects.len());

        for subject in subjects {
            let key = normalize_name(&subject.name);
            if key.is_empty() {
                continue;
            }
            exact.entry(key.clone()).or_insert(entries.len());
            entries.push(SubjectEntry {
                tokens: tokenize(&key),
                subject,
            });
        }

        Self { exact, entries }
    }

    pub(crate) fn find(&self, subject_name: &str) -> Option<&'a TranscriptSubject> {
        let key = normalize_name(subject_name);
        if key.is_empty() {
            return None;
        }

        if let Some(&position) = self.exact.get(&key) {
            return Some(self.entries[position].subject);
        }

        let wanted = tokenize(&key);
        self.entries
            .iter()
            .find(|entry| tokens_overlap(&wanted, &entry.tokens))
            .map(|entry| entry.subject)
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn tokenize(name: &str) -> Vec<String> {
    name.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .map(singularize)
        .collect()
}

fn singularize(token: &str) -> String {
    if token.chars().count() > 3 && token.ends_with('s') {
        token[..token.len() - 1].to_string()
    } else {
        token.to_string()
    }
}

fn tokens_overlap(left: &[String], right: &[String]) -> bool {
    left.iter()
        .any(|a| right.iter().any(|b| token_matches(a, b)))
}

fn token_matches(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    (b.chars().count() >= MIN_CONTAINED_LEN && a.contains(b))
        || (a.chars().count() >= MIN_CONTAINED_LEN && b.contains(a))
}
