//! Adapter implementations for user lookup.

pub mod memory;
