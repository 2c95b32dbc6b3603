//! # CLI Behavior
//!
//! One UI client for quotebook. The CLI is the only place that knows about
//! terminal I/O, exit codes and output formatting; everything it shows comes
//! from a `CmdResult` returned by the API facade.
//!
//! Running `quotebook` with no arguments lists every quote. `--quotes <dir>`
//! overrides the configured collection for a single run, and the data
//! directory (favorites and config) can be moved with `QUOTEBOOK_HOME`.
//!
//! `quotebook serve` starts the HTTP service; it is the only command that
//! needs an async runtime.
//!
//! - `setup.rs`: clap definitions and version string
//! - `commands.rs`: context wiring and dispatch
//! - `print.rs`: terminal output

mod commands;
mod print;
mod setup;

pub use commands::run;
