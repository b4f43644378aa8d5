//! rpncalc - reverse polish notation calculator
//!
//! Usage:
//!   rpncalc              Start interactive REPL
//!   rpncalc -c "3 4 +"   Evaluate tokens and print the stack
//!   rpncalc script.rpn   Evaluate a script file

mod cli;
mod rcfile;
mod repl;
mod terminal;

use cli::{execute_command, execute_script, parse_args, print_help, print_version};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only calculator output
fn init_tracing() {
    let filter = EnvFilter::try_from_env("RPNCALC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("rpncalc: {}", e);
            eprintln!("Try 'rpncalc --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    if let Some(cmd) = &cli.command {
        return execute_command(cmd, &cli);
    }

    if let Some(script) = &cli.script {
        return execute_script(script, &cli);
    }

    match repl::run_repl(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("REPL error: {}", e);
            ExitCode::FAILURE
        }
    }
}
