pub mod error;
pub mod eval;
pub mod knowledge;
pub mod matcher;
pub mod model;
pub mod processor;
pub mod similarity;
pub mod stem;
pub mod text;

pub use error::{Error, Result};
pub use eval::{EvalCase, EvalOutcome, EvalSummary, evaluate_cases, load_cases};
pub use knowledge::{KnowledgeBase, KnowledgeEntry, load_entries, reference_entries};
pub use matcher::{MatchResult, Matcher, SIMILARITY_THRESHOLD, find_best_response, rank};
pub use model::{Inquiry, ProcessedQuery, QueryStatus, RawInquiry, Reply};
pub use processor::{Clock, FixedClock, QueryProcessor, SystemClock};
pub use similarity::similarity;
pub use text::{TokenSet, normalize, tokenize};
