//! CLI command: ifeval check
//!
//! Evaluate one response against every constraint of a suite.
//!
//! Usage:
//!   ifeval check --suite suite.yaml --response answer.txt [--format text|json]
//!   cat answer.txt | ifeval check -s suite.yaml -r -
//!
//! Exit code is 1 when any constraint fails and 3 when any constraint
//! errors; errors take precedence.

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::exit_codes::{CONSTRAINT_FAILED, EVALUATION_ERROR, SUCCESS};
use anyhow::{Context, Result};
use ifeval_core::Constraint;
use ifeval_rules::load_suite;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Serialize)]
struct Outcome {
    kind: &'static str,
    group: String,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Pass,
    Fail,
    Error,
}

fn read_response(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading response from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading response {}", path.display()))
}

async fn evaluate_one(constraint: &dyn Constraint, response: &str) -> Outcome {
    let (status, reason) = match constraint.evaluate(response).await {
        Ok(eval) if eval.passed => (Status::Pass, None),
        Ok(eval) => (Status::Fail, eval.reason),
        Err(e) => {
            error!(kind = constraint.kind(), error = %e, "constraint evaluation errored");
            (Status::Error, Some(format!("{e:#}")))
        }
    };
    Outcome {
        kind: constraint.kind(),
        group: constraint.group().to_string(),
        status,
        reason,
    }
}

fn exit_code(outcomes: &[Outcome]) -> i32 {
    if outcomes.iter().any(|o| o.status == Status::Error) {
        EVALUATION_ERROR
    } else if outcomes.iter().any(|o| o.status == Status::Fail) {
        CONSTRAINT_FAILED
    } else {
        SUCCESS
    }
}

pub async fn run(args: CheckArgs) -> Result<i32> {
    let suite = load_suite(&args.suite)
        .with_context(|| format!("loading suite {}", args.suite.display()))?;
    let judge = suite.judge_backend()?;
    let constraints = suite.build(judge)?;
    let response = read_response(&args.response)?;

    let outcomes = futures::future::join_all(
        constraints
            .iter()
            .map(|c| evaluate_one(c.as_ref(), &response)),
    )
    .await;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
        OutputFormat::Text => {
            for o in &outcomes {
                let label = match o.status {
                    Status::Pass => "PASS ",
                    Status::Fail => "FAIL ",
                    Status::Error => "ERROR",
                };
                match &o.reason {
                    Some(reason) => println!("{label} {} ({}): {reason}", o.kind, o.group),
                    None => println!("{label} {} ({})", o.kind, o.group),
                }
            }
        }
    }

    let passed = outcomes.iter().filter(|o| o.status == Status::Pass).count();
    info!(passed, total = outcomes.len(), "check finished");
    Ok(exit_code(&outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: Status) -> Outcome {
        Outcome {
            kind: "NoCommas",
            group: "Punctuation".to_string(),
            status,
            reason: None,
        }
    }

    #[test]
    fn errors_take_precedence_over_failures() {
        assert_eq!(exit_code(&[outcome(Status::Pass)]), SUCCESS);
        assert_eq!(
            exit_code(&[outcome(Status::Pass), outcome(Status::Fail)]),
            CONSTRAINT_FAILED
        );
        assert_eq!(
            exit_code(&[outcome(Status::Fail), outcome(Status::Error)]),
            EVALUATION_ERROR
        );
    }

    #[tokio::test]
    async fn outcome_carries_reason_on_failure() {
        let rule = ifeval_rules::punctuation::NoCommas::new(None);
        let out = evaluate_one(&rule, "a, b").await;
        assert_eq!(out.status, Status::Fail);
        assert_eq!(out.group, "Punctuation");
        assert!(out.reason.unwrap().starts_with("[No Commas]"));
    }
}
