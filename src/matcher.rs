use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::knowledge::KnowledgeBase;
use crate::similarity::similarity;
use crate::text::normalize;

/// Minimum similarity for an inquiry to be answered automatically.
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub answer: Option<String>,
    pub score: f64,
    /// Position of the best-scoring entry, reported even below threshold.
    pub entry_index: Option<usize>,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        self.answer.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Matcher {
    knowledge_base: KnowledgeBase,
    threshold: f64,
}

impl Matcher {
    pub fn new(knowledge_base: KnowledgeBase) -> Self {
        Self {
            knowledge_base,
            threshold: SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidArg(format!(
                "threshold must be within [0, 1], got {threshold}"
            )));
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn find_best_response(&self, message: &str) -> MatchResult {
        best_match(message, &self.knowledge_base, self.threshold)
    }

    pub fn rank(&self, message: &str, k: usize) -> Vec<(usize, f64)> {
        rank(message, &self.knowledge_base, k)
    }
}

/// Best canned answer for `message`, using [`SIMILARITY_THRESHOLD`].
pub fn find_best_response(message: &str, knowledge_base: &KnowledgeBase) -> MatchResult {
    best_match(message, knowledge_base, SIMILARITY_THRESHOLD)
}

fn best_match(message: &str, knowledge_base: &KnowledgeBase, threshold: f64) -> MatchResult {
    let tokens = normalize(message);

    let mut best: Option<(usize, &str)> = None;
    let mut best_score = 0.0;
    for (index, (entry, entry_tokens)) in knowledge_base.indexed().enumerate() {
        let score = similarity(&tokens, entry_tokens);
        // Strict comparison keeps the earliest entry on ties.
        if score > best_score {
            best_score = score;
            best = Some((index, entry.answer.as_str()));
        }
    }

    let answer = match best {
        Some((_, answer)) if best_score >= threshold => Some(answer.to_string()),
        _ => None,
    };

    MatchResult {
        answer,
        score: best_score,
        entry_index: best.map(|(index, _)| index),
    }
}

/// Top `k` entries as `(index, score)`, best first; ties keep knowledge base order.
pub fn rank(message: &str, knowledge_base: &KnowledgeBase, k: usize) -> Vec<(usize, f64)> {
    let tokens = normalize(message);
    let mut scored: Vec<(usize, f64)> = knowledge_base
        .indexed()
        .enumerate()
        .map(|(index, (_, entry_tokens))| (index, similarity(&tokens, entry_tokens)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().take(k).collect()
}
