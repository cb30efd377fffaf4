//! File system helpers for the snapshot copy.

pub mod copy;
