//! CLI command: ifeval instructions
//!
//! Usage:
//!   ifeval instructions --suite suite.yaml [--mode train|test] [--seed N] [--rewrite]

use crate::cli::args::InstructionsArgs;
use crate::exit_codes::SUCCESS;
use anyhow::{Context, Result};
use ifeval_rules::{instruction_block, load_suite};

pub fn run(args: InstructionsArgs) -> Result<i32> {
    let mut suite = load_suite(&args.suite)
        .with_context(|| format!("loading suite {}", args.suite.display()))?;
    if args.seed.is_some() {
        suite.seed = args.seed;
    }
    let mode = args.mode.unwrap_or(suite.mode);

    let judge = suite.judge_backend()?;
    let constraints = suite.build(judge)?;

    if args.rewrite {
        for (i, c) in constraints.iter().enumerate() {
            println!("{}. {}", i + 1, c.rewrite_instructions());
        }
    } else {
        println!("{}", instruction_block(&constraints, mode));
    }
    Ok(SUCCESS)
}
