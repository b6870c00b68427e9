//! Outbound adapters implementing the domain ports.

pub mod agent;
pub mod persistence;
