//! Common utilities for the GSP compiler.
//!
//! This crate provides shared infrastructure used by all compiler components:
//! - **Warning System** - colored terminal output for questionable but legal input

pub mod warning;
