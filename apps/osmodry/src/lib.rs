//! # osmodry
//!
//! Application layer around `osmodry-core`: command line, protocol files,
//! interactive prompting and chart rendering.

pub mod cli;
pub mod config;
pub mod plot;
