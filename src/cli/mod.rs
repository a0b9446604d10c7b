//! Command Line Interface (CLI) layer for BMFRM.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `tabs` and `tof`
//! subcommands. It wires user-provided options to the library API exposed
//! via `bmfrm::api`.
//!
//! If you are embedding BMFRM into another application, call `bmfrm::api`
//! or the core engines directly instead of the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
