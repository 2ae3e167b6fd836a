//! Runtime configuration of the web front end.

pub mod config;
