use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matcher::Matcher;
use crate::model::QueryStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub case_id: String,
    pub message: String,
    pub expected_status: QueryStatus,
    /// Knowledge base position whose answer should be returned.
    #[serde(default)]
    pub expected_entry: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalOutcome {
    pub case_id: String,
    pub passed: bool,
    pub actual_status: QueryStatus,
    pub actual_entry: Option<usize>,
    pub score: f64,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
    pub outcomes: Vec<EvalOutcome>,
}

impl EvalSummary {
    pub fn meets(&self, min_pass_rate: f64) -> bool {
        self.pass_rate >= min_pass_rate
    }
}

pub fn load_cases(path: &Path) -> Result<Vec<EvalCase>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn case_passed(case: &EvalCase, status: QueryStatus, entry: Option<usize>) -> bool {
    if case.expected_status != status {
        return false;
    }
    match (case.expected_entry, status) {
        (Some(expected), QueryStatus::Automated) => entry == Some(expected),
        _ => true,
    }
}

pub fn evaluate_cases(matcher: &Matcher, cases: &[EvalCase]) -> EvalSummary {
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        let start = Instant::now();
        let result = matcher.find_best_response(&case.message);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let status = if result.is_match() {
            QueryStatus::Automated
        } else {
            QueryStatus::Pending
        };

        outcomes.push(EvalOutcome {
            case_id: case.case_id.clone(),
            passed: case_passed(case, status, result.entry_index),
            actual_status: status,
            actual_entry: result.entry_index,
            score: result.score,
            latency_ms,
        });
    }

    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.passed).count();
    let failed = total.saturating_sub(passed);
    let pass_rate = if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64
    };

    EvalSummary {
        total,
        passed,
        failed,
        pass_rate,
        outcomes,
    }
}
