//! CLI command: ifeval competitives
//!
//! Usage:
//!   ifeval competitives [--kind NoCommas] [--check]

use crate::cli::args::CompetitivesArgs;
use crate::exit_codes::{CONFIG_ERROR, SUCCESS};
use anyhow::{bail, Result};
use ifeval_rules::{competitive_registry, ALL_KINDS};

pub fn run(args: CompetitivesArgs) -> Result<i32> {
    let registry = competitive_registry();

    if args.check {
        let mut violations = registry.validate();
        violations.extend(registry.validate_total(ALL_KINDS.iter().copied()));
        if violations.is_empty() {
            println!("competitive table OK ({} kinds)", registry.len());
            return Ok(SUCCESS);
        }
        for v in &violations {
            eprintln!("violation: {v}");
        }
        return Ok(CONFIG_ERROR);
    }

    let kinds: Vec<&str> = match &args.kind {
        Some(kind) if registry.contains(kind) => vec![kind.as_str()],
        Some(kind) => bail!("unknown constraint kind: {kind}"),
        None => registry.kinds().collect(),
    };
    for kind in kinds {
        let conflicts: Vec<String> = registry.competitives_of(kind).into_iter().collect();
        if conflicts.is_empty() {
            println!("{kind}: -");
        } else {
            println!("{kind}: {}", conflicts.join(", "));
        }
    }
    Ok(SUCCESS)
}
