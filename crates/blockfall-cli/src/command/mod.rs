use clap::{Parser, Subcommand};

use self::{headless::HeadlessArg, play::PlayArg};

mod headless;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Apply a scripted sequence of actions and print the final state as JSON
    Headless(#[clap(flatten)] HeadlessArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Headless(arg) => headless::run(&arg)?,
    }
    Ok(())
}
