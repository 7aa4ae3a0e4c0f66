use super::args::{Cli, Command};

pub mod check;
pub mod competitives;
pub mod instructions;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Instructions(args) => instructions::run(args),
        Command::Check(args) => check::run(args).await,
        Command::Competitives(args) => competitives::run(args),
    }
}
