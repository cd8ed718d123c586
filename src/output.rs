use std::io::{self, Write};

use serde::Serialize;

use inquiry_responder::{
    Error, EvalSummary, KnowledgeBase, MatchResult, ProcessedQuery, Result,
};

pub fn print_processed(format: &str, record: &ProcessedQuery) -> Result<()> {
    match format {
        "text" => print_processed_text(record),
        "json" => print_json(record),
        other => Err(unknown_format(other)),
    }
}

fn print_processed_text(record: &ProcessedQuery) -> Result<()> {
    let mut out = io::stdout();
    writeln!(out, "From: {} <{}>", record.name, record.email)?;
    writeln!(out, "Subject: {}", record.subject)?;
    writeln!(out, "Status: {}", record.status().as_str())?;
    if let Some(response) = record.response() {
        writeln!(out, "Response: {response}")?;
    }
    if let Some(at) = record.auto_replied_at() {
        writeln!(out, "Auto-replied at: {}", at.to_rfc3339())?;
    }
    writeln!(out, "Created at: {}", record.created_at.to_rfc3339())?;
    Ok(())
}

#[derive(Serialize)]
struct JsonMatch<'a> {
    #[serde(flatten)]
    result: &'a MatchResult,
    threshold: f64,
    ranking: Vec<JsonRanked<'a>>,
}

#[derive(Serialize)]
struct JsonRanked<'a> {
    index: usize,
    score: f64,
    question: &'a str,
}

pub fn print_match(
    format: &str,
    kb: &KnowledgeBase,
    threshold: f64,
    result: &MatchResult,
    ranking: &[(usize, f64)],
) -> Result<()> {
    let ranked: Vec<JsonRanked<'_>> = ranking
        .iter()
        .filter_map(|&(index, score)| {
            kb.get(index).map(|entry| JsonRanked {
                index,
                score,
                question: &entry.question,
            })
        })
        .collect();

    match format {
        "text" => {
            let mut out = io::stdout();
            writeln!(
                out,
                "decision={} score={:.4} threshold={:.2} entry={}",
                if result.is_match() { "automated" } else { "pending" },
                result.score,
                threshold,
                result
                    .entry_index
                    .map(|i| i.to_string())
                    .unwrap_or_else(|| "null".to_string())
            )?;
            if let Some(answer) = &result.answer {
                writeln!(out, "answer={answer}")?;
            }
            for r in &ranked {
                writeln!(out, "  #{} {:.4} {}", r.index, r.score, r.question)?;
            }
            Ok(())
        }
        "json" => print_json(&JsonMatch {
            result,
            threshold,
            ranking: ranked,
        }),
        other => Err(unknown_format(other)),
    }
}

pub fn print_eval(summary: &EvalSummary, min_pass_rate: f64) -> Result<()> {
    let mut out = io::stdout();
    writeln!(
        out,
        "total={} passed={} failed={} pass_rate={:.4} required={:.4} meets_threshold={}",
        summary.total,
        summary.passed,
        summary.failed,
        summary.pass_rate,
        min_pass_rate,
        summary.meets(min_pass_rate)
    )?;
    for o in &summary.outcomes {
        writeln!(
            out,
            "case={} passed={} status={} entry={} score={:.4} latency={:.3}ms",
            o.case_id,
            o.passed,
            o.actual_status.as_str(),
            o.actual_entry
                .map(|i| i.to_string())
                .unwrap_or_else(|| "null".to_string()),
            o.score,
            o.latency_ms
        )?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

fn unknown_format(format: &str) -> Error {
    Error::InvalidArg(format!("Unknown output format: {format}"))
}
