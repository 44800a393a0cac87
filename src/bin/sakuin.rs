//! sakuin CLI binary.

use clap::Parser;
use sakuin::cli::args::SakuinArgs;
use sakuin::cli::commands::execute_command;
use std::process;

fn main() {
    let args = SakuinArgs::parse();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
