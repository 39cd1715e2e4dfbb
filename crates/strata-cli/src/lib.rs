//! `strata` command-line front end.
//!
//! Argument parsing and command dispatch live in [`cli`]; the binary in `src/bin` only
//! installs logging and calls [`cli::run`].

pub mod backend;
pub mod cli;
pub mod report;
