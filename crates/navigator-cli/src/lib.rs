//! Navigator CLI library.
//!
//! Holds the pieces of the `navigator` binary that are worth testing on their
//! own: logging setup and the JSON shape of command output.

#![deny(warnings)]

pub mod logging;
pub mod output;
