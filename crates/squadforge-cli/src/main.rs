mod cli;
mod run;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    squadforge::console::init();

    match run::execute(&cli) {
        Ok(report) => {
            println!("{}", run::render(&cli, &report));
            if run::is_short(&cli, &report) {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            ExitCode::from(1)
        }
    }
}
