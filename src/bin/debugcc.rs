// CLASSIFICATION: COMMUNITY
// Filename: debugcc.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Entry point for the debugcc clock probe.

use clap::Parser;
use debugcc::binlib::debugcc_main::{run, Cli};

fn main() {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}
