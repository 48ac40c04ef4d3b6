//! Shell completion generation for racedash

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

use crate::Cli;

pub fn generate_completion(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "racedash", &mut io::stdout());
}
