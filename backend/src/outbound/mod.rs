//! Outbound adapters for driven ports.

pub mod persistence;
