use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "inquiry-responder",
    version,
    about = "Answer customer inquiries from a canned knowledge base or queue them"
)]
pub struct Cli {
    /// JSON array (.json) or JSON Lines file of {question, answer} pairs.
    /// The built-in reference answers are used when omitted.
    #[arg(long, global = true, env = "INQUIRY_KB_PATH")]
    pub knowledge_base: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process one inquiry given as JSON {name, email, subject, message}.
    Process {
        /// Read the inquiry from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Timestamp to stamp the record with (RFC 3339) instead of the current time.
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        #[arg(long, default_value = "json")]
        output: String,
    },
    /// Score a message against the knowledge base.
    Match {
        #[arg(long)]
        message: String,

        #[arg(long, default_value_t = 3)]
        top: usize,

        #[arg(long, default_value = "text")]
        output: String,
    },
    /// Run labelled cases and report the pass rate.
    Eval {
        #[arg(long)]
        cases: PathBuf,

        #[arg(long, default_value_t = 1.0)]
        min_pass_rate: f64,
    },
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Process { output, .. } | Command::Match { output, .. }
                if output != "text" && output != "json" =>
            {
                Err(format!("unknown output format: {output}"))
            }
            Command::Match { top: 0, .. } => Err("top must be > 0".to_string()),
            Command::Eval { min_pass_rate, .. } if !(0.0..=1.0).contains(min_pass_rate) => {
                Err("min-pass-rate must be within [0, 1]".to_string())
            }
            _ => Ok(()),
        }
    }
}
