//! Domain records exchanged with the loyalty API and their derived views.

pub mod customer;
pub mod establishment;
pub mod ledger;
pub mod purchase;
pub mod record;
pub mod types;
