//! Shared plumbing for the jose-tool workspace
//!
//! Every command reads one buffer from a file or standard input and writes
//! one buffer to a file or standard output; the helpers for that live in
//! [`io`]. [`logging`] sets up the `log` facade once per process.

pub mod io;
pub mod logging;

pub use io::{IoError, IoResult, is_stdio, print_line, read_input, write_json, write_output};
