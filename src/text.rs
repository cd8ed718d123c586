use std::collections::BTreeSet;

use crate::stem::stem;

/// Set of stemmed word tokens. Presence matters, frequency does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.0.contains(stem)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection_len(&self, other: &TokenSet) -> usize {
        self.0.intersection(&other.0).count()
    }

    pub fn union_len(&self, other: &TokenSet) -> usize {
        self.0.union(&other.0).count()
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Lowercases `text` and splits it into alphanumeric word tokens, in order.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Token set of the stems of every word in `text`.
pub fn normalize(text: &str) -> TokenSet {
    tokenize(text).iter().map(|token| stem(token)).collect()
}
