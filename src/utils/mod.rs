//! Utility functions and helpers

pub mod preserve;
