use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::knowledge::KnowledgeBase;
use crate::matcher::Matcher;
use crate::model::{Inquiry, ProcessedQuery, Reply};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Decides, per inquiry, between an automated reply and a pending record.
///
/// Holds no per-call state; one instance can serve concurrent callers.
#[derive(Clone)]
pub struct QueryProcessor {
    matcher: Matcher,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl QueryProcessor {
    pub fn new(knowledge_base: KnowledgeBase) -> Self {
        Self::with_matcher(Matcher::new(knowledge_base), Arc::new(SystemClock))
    }

    pub fn with_matcher(matcher: Matcher, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { matcher, clock }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn process_query(&self, inquiry: &Inquiry) -> ProcessedQuery {
        let result = self.matcher.find_best_response(inquiry.message());
        let now = self.clock.now();

        let reply = match result.answer {
            Some(response) => Reply::Automated {
                response,
                auto_replied_at: now,
            },
            None => Reply::Pending,
        };

        tracing::debug!(
            score = result.score,
            entry = ?result.entry_index,
            automated = matches!(reply, Reply::Automated { .. }),
            "processed inquiry"
        );

        ProcessedQuery {
            name: inquiry.name().to_string(),
            email: inquiry.email().to_string(),
            subject: inquiry.subject().to_string(),
            message: inquiry.message().to_string(),
            reply,
            created_at: now,
        }
    }
}
