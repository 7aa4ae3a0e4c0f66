use clap::{Args, Parser, Subcommand, ValueEnum};
use ifeval_core::InstructionMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ifeval",
    version,
    about = "Inspect and check instruction-following constraint suites"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the instruction block of a suite
    Instructions(InstructionsArgs),
    /// Evaluate a response against a suite
    Check(CheckArgs),
    /// Print or validate the competitive table
    Competitives(CompetitivesArgs),
}

#[derive(Args, Debug)]
pub struct InstructionsArgs {
    /// Suite file (YAML)
    #[arg(short, long)]
    pub suite: PathBuf,

    /// Instruction mode: train or test (default: the suite's mode)
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<InstructionMode>,

    /// Override the suite seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print repair instructions instead
    #[arg(long)]
    pub rewrite: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Suite file (YAML)
    #[arg(short, long)]
    pub suite: PathBuf,

    /// Response file; `-` reads stdin
    #[arg(short, long)]
    pub response: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct CompetitivesArgs {
    /// Show only this kind
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Validate symmetry and totality instead of printing
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_mode(raw: &str) -> Result<InstructionMode, String> {
    raw.parse().map_err(|e: ifeval_core::ConfigError| e.to_string())
}
