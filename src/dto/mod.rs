//! DTO modules that bridge services with templates.

pub mod registration;
pub mod visualization;
