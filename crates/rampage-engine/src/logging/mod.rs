//! Logging utilities.
//!
//! Library code only talks to the `log` facade; binaries and tests that want
//! output call [`init_logging`] once.

mod init;

pub use init::{init_logging, LoggingConfig};
