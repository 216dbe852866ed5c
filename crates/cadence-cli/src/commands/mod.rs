pub mod access;
pub mod config;
pub mod entitlement;
pub mod habit;
pub mod ledger;
pub mod period;
pub mod review;
pub mod task;

mod common;
