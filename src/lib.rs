//! daybook - Terminal mood journal
//!
//! A command-line journal of dated entries, each with a mood and optional
//! images, kept per signed-in user in a local backend directory.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DaybookError;
