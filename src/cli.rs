// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "axiom",
    about = "An interactive math tutoring client for the terminal",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional question submitted as the first turn of the TUI session
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Tutoring service base URL, e.g. "http://localhost:8000"
    #[arg(long, short = 's', env = "AXIOM_SERVER")]
    pub server: Option<String>,

    /// Topic for this session (algebra | geometry | calculus)
    #[arg(long, short = 't')]
    pub topic: Option<String>,

    /// Difficulty for this session (easy | medium | hard)
    #[arg(long, short = 'd')]
    pub difficulty: Option<String>,

    /// Bearer token for the tutoring service.
    /// Defaults to the token stored by `axiom login`.
    #[arg(long, env = "AXIOM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a single question headlessly and print the tutor's reply to stdout
    Ask {
        /// The question to send
        question: String,
    },
    /// Log in to the tutoring service and store the bearer token
    Login {
        /// Account email
        email: String,
        /// Password.  Prompted for interactively when omitted.
        #[arg(long, short = 'p')]
        password: Option<String>,
    },
    /// Create an account on the tutoring service
    Register {
        /// Account email
        email: String,
        /// Password.  Prompted for interactively when omitted.
        #[arg(long, short = 'p')]
        password: Option<String>,
    },
    /// Remove the stored bearer token
    Logout,
    /// Print the effective configuration and exit
    ShowConfig,
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "axiom", &mut std::io::stdout());
}
