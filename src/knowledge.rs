use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::{TokenSet, normalize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    #[serde(alias = "query")]
    pub question: String,
    #[serde(alias = "response")]
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    entry: KnowledgeEntry,
    tokens: TokenSet,
}

/// Ordered canned answers with their questions normalized up front.
///
/// Order is significant: when two entries score the same, the earlier one
/// wins.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<IndexedEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        let entries: Vec<IndexedEntry> = entries
            .into_iter()
            .map(|entry| IndexedEntry {
                tokens: normalize(&entry.question),
                entry,
            })
            .collect();

        if entries.is_empty() {
            tracing::warn!("knowledge base is empty; every inquiry will be queued as pending");
        } else {
            tracing::info!(entries = entries.len(), "knowledge base loaded");
        }

        Self { entries }
    }

    /// The five canned answers shipped with the service.
    pub fn reference() -> Self {
        Self::new(reference_entries())
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(load_entries(path)?))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&KnowledgeEntry> {
        self.entries.get(index).map(|e| &e.entry)
    }

    pub fn entries(&self) -> impl Iterator<Item = &KnowledgeEntry> {
        self.entries.iter().map(|e| &e.entry)
    }

    pub(crate) fn indexed(&self) -> impl Iterator<Item = (&KnowledgeEntry, &TokenSet)> {
        self.entries.iter().map(|e| (&e.entry, &e.tokens))
    }
}

pub fn reference_entries() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "Do you offer data secure erasure for hard drives?",
            "Yes, we offer secure data erasure services for all types of hard drives. Our process complies with industry standards and provides a certificate of erasure.",
        ),
        KnowledgeEntry::new(
            "What are your rates for recycling laptops?",
            "Our laptop recycling rates depend on the quantity and condition. For bulk orders (50+), we offer special discounts. Standard recycling starts at M50 per unit. Please contact our sales team for a detailed quote.",
        ),
        KnowledgeEntry::new(
            "How do you handle environmentally hazardous materials?",
            "We follow strict environmental protocols for handling hazardous materials. All components containing harmful substances are processed in our specialized facility that meets international environmental standards.",
        ),
        KnowledgeEntry::new(
            "Can you recover data from damaged hard drives?",
            "Yes, we provide data recovery services for damaged hard drives. The success rate depends on the extent of damage. We offer free evaluation and only charge if we successfully recover your data.",
        ),
        KnowledgeEntry::new(
            "Do you offer pickup services for e-waste?",
            "Yes, we offer pickup services for e-waste collection. For businesses within Lesotho, we provide free pickup for orders above M5000. For smaller orders or locations outside Lesotho, a nominal fee applies.",
        ),
    ]
}

/// Reads entries from a JSON array (`.json`) or JSON Lines (anything else).
pub fn load_entries(path: &Path) -> Result<Vec<KnowledgeEntry>> {
    let file = File::open(path).map_err(|e| {
        Error::KnowledgeBase(format!("cannot open {}: {e}", path.display()))
    })?;

    if path.extension().and_then(|e| e.to_str()) == Some("json") {
        return Ok(serde_json::from_reader(BufReader::new(file))?);
    }

    let mut entries = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(&line).map_err(|e| {
            Error::KnowledgeBase(format!("{} line {}: {e}", path.display(), n + 1))
        })?;
        entries.push(entry);
    }

    Ok(entries)
}
