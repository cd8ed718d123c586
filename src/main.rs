mod cli;
mod output;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use inquiry_responder::{
    FixedClock, KnowledgeBase, Matcher, QueryProcessor, RawInquiry, SystemClock, evaluate_cases,
    load_cases,
};

use crate::cli::{Cli, Command};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn load_knowledge_base(cli: &Cli) -> Result<KnowledgeBase> {
    match &cli.knowledge_base {
        Some(path) => KnowledgeBase::load(path)
            .with_context(|| format!("load knowledge base {}", path.display())),
        None => Ok(KnowledgeBase::reference()),
    }
}

fn read_inquiry(input: Option<&std::path::Path>) -> Result<RawInquiry> {
    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    serde_json::from_reader(reader).context("parse inquiry json")
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.validate().map_err(anyhow::Error::msg)?;

    let kb = load_knowledge_base(&cli)?;

    match &cli.command {
        Command::Process { input, now, output } => {
            let inquiry = read_inquiry(input.as_deref())?.validate()?;
            let processor = match now {
                Some(at) => {
                    QueryProcessor::with_matcher(Matcher::new(kb), Arc::new(FixedClock(*at)))
                }
                None => QueryProcessor::with_matcher(Matcher::new(kb), Arc::new(SystemClock)),
            };

            let record = processor.process_query(&inquiry);
            output::print_processed(output, &record)?;
        }
        Command::Match {
            message,
            top,
            output,
        } => {
            let matcher = Matcher::new(kb);
            let result = matcher.find_best_response(message);
            let ranking = matcher.rank(message, *top);
            output::print_match(
                output,
                matcher.knowledge_base(),
                matcher.threshold(),
                &result,
                &ranking,
            )?;
        }
        Command::Eval {
            cases,
            min_pass_rate,
        } => {
            let matcher = Matcher::new(kb);
            let cases = load_cases(cases)
                .with_context(|| format!("load eval cases {}", cases.display()))?;
            let summary = evaluate_cases(&matcher, &cases);
            output::print_eval(&summary, *min_pass_rate)?;

            if !summary.meets(*min_pass_rate) {
                anyhow::bail!(
                    "pass rate {:.4} below required {:.4}",
                    summary.pass_rate,
                    min_pass_rate
                );
            }
        }
    }

    Ok(())
}
